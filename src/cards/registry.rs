//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card a battle may see: class cards,
//! adversary moves and junk. Registration validates each card, so a loaded
//! registry only ever holds well-formed data.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardKind};
use crate::core::CatalogError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use factory_storm::cards::{Card, CardId, CardKind, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(Card::new(CardId::new(1), "Jab", CardKind::Attack, 1).with_value(6))
///     .unwrap();
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Jab");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from cards, failing on the first defect.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CatalogError> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Parse a JSON array of cards.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Validate and register a card.
    pub fn register(&mut self, card: Card) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        validate(&card)?;
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Resolve a list of ids into cards.
    pub fn deck(&self, ids: &[CardId]) -> Result<Vec<Card>, CatalogError> {
        ids.iter()
            .map(|&id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| CatalogError::Unknown(id.to_string()))
            })
            .collect()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        let mut cards: Vec<&Card> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}

fn validate(card: &Card) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidCard {
        id: card.id,
        reason,
    };

    if card.cost < 0 {
        return Err(invalid(format!("negative cost {}", card.cost)));
    }
    for (field, amount) in [
        ("value", card.value),
        ("heal", card.heal),
        ("energy_gain", card.energy_gain),
    ] {
        if let Some(n) = amount.filter(|n| *n < 0) {
            return Err(invalid(format!("negative {field} {n}")));
        }
    }
    if card.kind == CardKind::Status && (card.value.is_some() || !card.ops.is_empty()) {
        return Err(invalid("junk cards carry no effects".to_string()));
    }
    if let Some(reason) = card.ops.iter().find_map(|op| op.defect()) {
        return Err(invalid(reason));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::EffectOp;

    fn jab(id: u32) -> Card {
        Card::new(CardId::new(id), "Jab", CardKind::Attack, 1).with_value(6)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(jab(1)).unwrap();

        assert_eq!(registry.get(CardId::new(1)).map(|c| c.name.as_str()), Some("Jab"));
        assert!(registry.get(CardId::new(99)).is_none());
        assert!(registry.contains(CardId::new(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CardRegistry::new();
        registry.register(jab(1)).unwrap();
        let err = registry.register(jab(1)).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == CardId::new(1)));
    }

    #[test]
    fn test_malformed_op_rejected() {
        let card = jab(2).with_op(EffectOp::RandomValue { min: 10, max: 2 });
        let err = CardRegistry::from_cards([card]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCard { .. }));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let card = Card::new(CardId::new(3), "Free Lunch", CardKind::Skill, -1);
        assert!(CardRegistry::from_cards([card]).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": 1, "name": "Jab", "kind": "Attack", "cost": 1, "value": 6},
            {"id": 2, "name": "Guard", "kind": "Skill", "cost": 1, "value": 5,
             "ops": [{"BonusShield": 3}]}
        ]"#;
        let registry = CardRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        let guard = registry.get(CardId::new(2)).unwrap();
        assert!(guard.has_op(&EffectOp::BonusShield(3)));
    }

    #[test]
    fn test_from_json_rejects_runaway_repeat() {
        let json = r#"[
            {"id": 1, "name": "Flurry", "kind": "Attack", "cost": 1, "value": 1,
             "ops": [{"Repeat": 4294967295}]}
        ]"#;
        let err = CardRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCard { .. }));
    }

    #[test]
    fn test_from_json_parse_error() {
        let err = CardRegistry::from_json("[{").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_iteration_in_id_order() {
        let registry = CardRegistry::from_cards([jab(5), jab(2), jab(9)]).unwrap();
        let ids: Vec<_> = registry.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_deck_lookup() {
        let registry = CardRegistry::from_cards([jab(1)]).unwrap();
        let deck = registry.deck(&[CardId::new(1), CardId::new(1)]).unwrap();
        assert_eq!(deck.len(), 2);
        assert!(registry.deck(&[CardId::new(4)]).is_err());
    }
}
