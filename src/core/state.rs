//! Battle state aggregate.
//!
//! `BattleState` bundles everything a card resolution may touch: both
//! combatants, the player's piles, the per-turn counters and the action
//! history. The turn machine owns it and lends it `&mut` to the resolver.
//!
//! The history is an `im::Vector`, so cloning a state (for snapshots or
//! look-ahead) is O(1) in the history length.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::combatant::{Combatant, Side};
use super::error::SnapshotError;
use super::rng::GameRng;
use crate::cards::CardKind;
use crate::rules::BattleOutcome;
use crate::status::StatusKind;
use crate::zones::Piles;

/// Per-turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCounters {
    /// Turn number (starts at 1).
    pub number: u32,

    /// Cards the player has played this turn.
    pub cards_played: u32,

    /// Kind of the most recent card the player played this turn.
    pub last_player_card: Option<CardKind>,

    /// Action sequence within the turn.
    pub sequence: u32,
}

impl Default for TurnCounters {
    fn default() -> Self {
        Self {
            number: 1,
            cards_played: 0,
            last_player_card: None,
            sequence: 0,
        }
    }
}

/// Everything a battle mutates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub player: Combatant,
    pub enemy: Combatant,
    pub piles: Piles,
    pub turn: TurnCounters,
    history: Vector<ActionRecord>,
}

impl BattleState {
    #[must_use]
    pub fn new(player: Combatant, enemy: Combatant, piles: Piles) -> Self {
        Self {
            player,
            enemy,
            piles,
            turn: TurnCounters::default(),
            history: Vector::new(),
        }
    }

    // === Combatant access ===

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Borrow `(actor, opponent)` mutably at once.
    pub fn pair_mut(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant) {
        match actor {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        }
    }

    // === Pipeline ===

    /// Draw for the player, one fewer (minimum 1) under Overtime.
    pub fn draw_for_player(&mut self, n: usize, rng: &mut GameRng) -> usize {
        let n = if self.player.statuses.has(StatusKind::Overtime) {
            n.saturating_sub(1).max(1)
        } else {
            n
        };
        self.piles.draw(n, rng)
    }

    // === Outcome ===

    /// Terminal result, if either side is down.
    ///
    /// A double knockout counts as a loss.
    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if self.player.is_defeated() {
            Some(BattleOutcome::Loss)
        } else if self.enemy.is_defeated() {
            Some(BattleOutcome::Win)
        } else {
            None
        }
    }

    // === History ===

    /// Record an action at the next sequence number of this turn.
    pub fn record(&mut self, side: Side, action: Action) {
        let record = ActionRecord::new(side, action, self.turn.number, self.turn.sequence);
        self.turn.sequence += 1;
        self.history.push_back(record);
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Reset per-turn counters and advance the turn number.
    pub fn advance_turn(&mut self) {
        self.turn.number += 1;
        self.turn.cards_played = 0;
        self.turn.last_player_card = None;
        self.turn.sequence = 0;
    }

    // === Snapshots ===

    /// Encode the full state.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`BattleState::snapshot`].
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{Adversary, PlayerClass};
    use crate::cards::CardId;

    fn state() -> BattleState {
        let mut rng = GameRng::new(5);
        let profile = PlayerClass::Civil.profile();
        let piles = Piles::from_deck(&profile.deck, &mut rng);
        BattleState::new(
            Combatant::player(&profile),
            Combatant::enemy(&Adversary::Client.template()),
            piles,
        )
    }

    #[test]
    fn test_pair_mut_orientation() {
        let mut state = state();
        let (actor, opponent) = state.pair_mut(Side::Enemy);
        assert!(!actor.is_player());
        assert!(opponent.is_player());
    }

    #[test]
    fn test_overtime_draws_one_fewer() {
        let mut state = state();
        let mut rng = GameRng::new(1);
        state.player.statuses.apply(StatusKind::Overtime, 1);
        assert_eq!(state.draw_for_player(2, &mut rng), 1);
        assert_eq!(state.draw_for_player(1, &mut rng), 1);
        assert!(state.piles.is_consistent());
    }

    #[test]
    fn test_outcome() {
        let mut state = state();
        assert_eq!(state.outcome(), None);
        state.enemy.defeat();
        assert_eq!(state.outcome(), Some(BattleOutcome::Win));
        state.player.defeat();
        assert_eq!(state.outcome(), Some(BattleOutcome::Loss));
    }

    #[test]
    fn test_record_sequences_within_turn() {
        let mut state = state();
        state.record(Side::Player, Action::Play(CardId::new(504)));
        state.record(Side::Player, Action::EndTurn);
        state.advance_turn();
        state.record(Side::Enemy, Action::Skip);

        let seqs: Vec<_> = state.history().iter().map(|r| (r.turn, r.sequence)).collect();
        assert_eq!(seqs, vec![(1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_advance_turn_resets_counters() {
        let mut state = state();
        state.turn.cards_played = 3;
        state.turn.last_player_card = Some(CardKind::Skill);

        state.advance_turn();

        assert_eq!(state.turn.number, 2);
        assert_eq!(state.turn.cards_played, 0);
        assert_eq!(state.turn.last_player_card, None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = state();
        let mut rng = GameRng::new(2);
        state.draw_for_player(4, &mut rng);
        state.player.statuses.apply(StatusKind::Strength, -2);
        state.record(Side::Player, Action::EndTurn);

        let bytes = state.snapshot().unwrap();
        let restored = BattleState::restore(&bytes).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_restore_garbage_fails() {
        assert!(BattleState::restore(&[1, 2, 3]).is_err());
    }
}
