//! Draw pile, hand and discard pile for the player's battle deck.
//!
//! Cards move between three ordered piles plus a single in-play slot that
//! holds the card being resolved. The piles use persistent `im::Vector`s so a
//! battle snapshot is a cheap clone.
//!
//! ## Invariant
//!
//! `draw + hand + discard + in_play == tracked` after every operation.
//! `tracked` starts at the deck size and only grows when a card is shuffled
//! in from outside (duplicates, junk).
//!
//! ```
//! use factory_storm::cards::catalog::PlayerClass;
//! use factory_storm::core::GameRng;
//! use factory_storm::zones::Piles;
//!
//! let mut rng = GameRng::new(1);
//! let mut piles = Piles::from_deck(&PlayerClass::Pm.starter_deck(), &mut rng);
//! assert_eq!(piles.draw(4, &mut rng), 4);
//! assert_eq!(piles.hand().len(), 4);
//! assert!(piles.is_consistent());
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::GameRng;

/// The player's battle-scoped card piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    /// Head is the next card drawn.
    draw: Vector<Card>,
    /// Cards in drawn order.
    hand: Vector<Card>,
    discard: Vector<Card>,
    in_play: Option<Card>,
    tracked: usize,
}

impl Piles {
    /// Shuffle a copy of `deck` into a fresh draw pile.
    #[must_use]
    pub fn from_deck(deck: &[Card], rng: &mut GameRng) -> Self {
        let mut cards = deck.to_vec();
        rng.shuffle(&mut cards);
        Self {
            tracked: cards.len(),
            draw: cards.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Piles laid out exactly as given, for setting up positions.
    #[must_use]
    pub fn from_parts(draw: Vec<Card>, hand: Vec<Card>, discard: Vec<Card>) -> Self {
        Self {
            tracked: draw.len() + hand.len() + discard.len(),
            draw: draw.into_iter().collect(),
            hand: hand.into_iter().collect(),
            discard: discard.into_iter().collect(),
            in_play: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard
    }

    #[must_use]
    pub fn in_play(&self) -> Option<&Card> {
        self.in_play.as_ref()
    }

    #[must_use]
    pub fn tracked(&self) -> usize {
        self.tracked
    }

    /// Cards currently held across every pile.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + usize::from(self.in_play.is_some())
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total() == self.tracked
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Draw up to `n` cards into the hand tail.
    ///
    /// When the draw pile is short, the whole discard pile is shuffled and
    /// appended first. Never fails; returns how many cards were drawn.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> usize {
        if self.draw.len() < n && !self.discard.is_empty() {
            let mut recycled: Vec<Card> = std::mem::take(&mut self.discard).into_iter().collect();
            rng.shuffle(&mut recycled);
            self.draw.extend(recycled);
        }

        let count = n.min(self.draw.len());
        for _ in 0..count {
            if let Some(card) = self.draw.pop_front() {
                self.hand.push_back(card);
            }
        }
        count
    }

    /// Move the card at `index` out of the hand into the in-play slot.
    ///
    /// Returns a copy of the card, or `None` for a bad index or when a card
    /// is already in play.
    pub fn take_from_hand(&mut self, index: usize) -> Option<Card> {
        if index >= self.hand.len() || self.in_play.is_some() {
            return None;
        }
        let card = self.hand.remove(index);
        self.in_play = Some(card.clone());
        Some(card)
    }

    /// Move the in-play card to the discard pile.
    pub fn discard_played(&mut self) {
        if let Some(card) = self.in_play.take() {
            self.discard.push_back(card);
        }
    }

    /// Discard the whole hand. Returns how many cards moved.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        let hand = std::mem::take(&mut self.hand);
        self.discard.append(hand);
        count
    }

    /// End-of-turn sweep: every card left in hand goes to discard.
    pub fn sweep_hand(&mut self) -> usize {
        self.discard_hand()
    }

    /// Discard up to `n` random cards from the hand.
    pub fn discard_random(&mut self, n: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut discarded = Vec::new();
        for _ in 0..n {
            if self.hand.is_empty() {
                break;
            }
            let index = rng.gen_index(self.hand.len());
            let card = self.hand.remove(index);
            self.discard.push_back(card.clone());
            discarded.push(card);
        }
        discarded
    }

    /// Insert a new card at a random position in the draw pile.
    pub fn shuffle_into_draw(&mut self, card: Card, rng: &mut GameRng) {
        let index = rng.gen_index(self.draw.len() + 1);
        self.draw.insert(index, card);
        self.tracked += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardKind};

    fn cards(range: std::ops::Range<u32>) -> Vec<Card> {
        range
            .map(|i| Card::new(CardId::new(i), format!("C{i}"), CardKind::Skill, 1))
            .collect()
    }

    #[test]
    fn test_from_deck_keeps_every_card() {
        let mut rng = GameRng::new(3);
        let deck = cards(0..10);
        let piles = Piles::from_deck(&deck, &mut rng);
        assert_eq!(piles.draw_pile().len(), 10);
        assert_eq!(piles.tracked(), 10);

        let mut ids: Vec<_> = piles.draw_pile().iter().map(|c| c.id.raw()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_takes_from_head() {
        let mut rng = GameRng::new(0);
        let mut piles = Piles::from_parts(cards(0..5), vec![], vec![]);
        assert_eq!(piles.draw(2, &mut rng), 2);
        let ids: Vec<_> = piles.hand().iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_draw_from_empty_everything() {
        let mut rng = GameRng::new(0);
        let mut piles = Piles::from_parts(vec![], cards(0..2), vec![]);
        assert_eq!(piles.draw(3, &mut rng), 0);
        assert_eq!(piles.hand().len(), 2);
    }

    #[test]
    fn test_take_and_discard_played() {
        let mut piles = Piles::from_parts(vec![], cards(0..3), vec![]);
        let card = piles.take_from_hand(1).unwrap();
        assert_eq!(card.id, CardId::new(1));
        assert_eq!(piles.hand().len(), 2);
        assert!(piles.is_consistent());

        // Only one card in flight at a time.
        assert!(piles.take_from_hand(0).is_none());

        piles.discard_played();
        assert!(piles.in_play().is_none());
        assert_eq!(piles.discard_pile().len(), 1);
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_take_bad_index() {
        let mut piles = Piles::from_parts(vec![], cards(0..1), vec![]);
        assert!(piles.take_from_hand(4).is_none());
        assert_eq!(piles.hand().len(), 1);
    }

    #[test]
    fn test_sweep_hand() {
        let mut piles = Piles::from_parts(cards(0..2), cards(2..6), vec![]);
        assert_eq!(piles.sweep_hand(), 4);
        assert!(piles.hand().is_empty());
        assert_eq!(piles.discard_pile().len(), 4);
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_discard_random_caps_at_hand_size() {
        let mut rng = GameRng::new(9);
        let mut piles = Piles::from_parts(vec![], cards(0..2), vec![]);
        assert_eq!(piles.discard_random(5, &mut rng).len(), 2);
        assert!(piles.hand().is_empty());
        assert!(piles.is_consistent());
    }

    #[test]
    fn test_shuffle_into_draw_grows_tracked() {
        let mut rng = GameRng::new(9);
        let mut piles = Piles::from_parts(cards(0..3), vec![], vec![]);
        piles.shuffle_into_draw(cards(10..11).remove(0), &mut rng);
        assert_eq!(piles.tracked(), 4);
        assert_eq!(piles.draw_pile().len(), 4);
        assert!(piles.is_consistent());
    }
}
