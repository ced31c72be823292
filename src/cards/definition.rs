//! Card definitions.
//!
//! A `Card` is an immutable value. The same definition is copied into piles,
//! move pools and the hand; nothing mutates a card after it is built.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ops::EffectOp;
use crate::status::StatusKind;

/// Unique identifier for a card definition.
///
/// Duplicated copies of a card share its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card kind. Decides whether `value` is damage or shield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// `value` is damage to the opponent.
    Attack,
    /// `value` is shield for the actor.
    Skill,
    /// `value` is shield for the actor; usually carries a lasting status.
    Power,
    /// Junk. Cannot be played.
    Status,
}

/// Who a status payload lands on, relative to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTarget {
    Own,
    Opponent,
}

/// A status applied when the card resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusPayload {
    pub kind: StatusKind,
    pub magnitude: i64,
    pub target: StatusTarget,
}

/// Static card data.
///
/// ```
/// use factory_storm::cards::{Card, CardId, CardKind, EffectOp};
///
/// let slam = Card::new(CardId::new(104), "Refactor Release", CardKind::Attack, 2)
///     .with_op(EffectOp::ScaleByShield { percent: 150, consume: true });
///
/// assert!(slam.is_playable());
/// assert_eq!(slam.value, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    pub name: String,

    pub kind: CardKind,

    /// Energy cost before modifiers.
    pub cost: i64,

    /// Damage (Attack) or shield (other kinds).
    #[serde(default)]
    pub value: Option<i64>,

    #[serde(default)]
    pub heal: Option<i64>,

    #[serde(default)]
    pub draw: Option<u32>,

    #[serde(default)]
    pub energy_gain: Option<i64>,

    #[serde(default)]
    pub status: Option<StatusPayload>,

    /// Special effects, in authoring order.
    #[serde(default)]
    pub ops: SmallVec<[EffectOp; 2]>,
}

impl Card {
    /// Create a card with no effects.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind, cost: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            cost,
            value: None,
            heal: None,
            draw: None,
            energy_gain: None,
            status: None,
            ops: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_heal(mut self, heal: i64) -> Self {
        self.heal = Some(heal);
        self
    }

    #[must_use]
    pub fn with_draw(mut self, draw: u32) -> Self {
        self.draw = Some(draw);
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy_gain = Some(energy);
        self
    }

    #[must_use]
    pub fn with_status(mut self, kind: StatusKind, magnitude: i64, target: StatusTarget) -> Self {
        self.status = Some(StatusPayload {
            kind,
            magnitude,
            target,
        });
        self
    }

    #[must_use]
    pub fn with_op(mut self, op: EffectOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Status-kind cards are junk.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.kind != CardKind::Status
    }

    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.kind == CardKind::Attack
    }

    #[must_use]
    pub fn has_op(&self, op: &EffectOp) -> bool {
        self.ops.contains(op)
    }

    /// Places a counter-heal stance.
    #[must_use]
    pub fn is_counter_heal(&self) -> bool {
        self.status
            .is_some_and(|payload| payload.kind == StatusKind::CounterHeal)
    }

    /// Gets through or removes shield.
    #[must_use]
    pub fn is_piercing(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, EffectOp::Penetrating | EffectOp::StripShield))
    }

    /// Can finish a weakened target outright.
    #[must_use]
    pub fn is_finisher(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, EffectOp::Execute { .. }))
    }

    #[must_use]
    pub fn grants_extra_action(&self) -> bool {
        self.has_op(&EffectOp::ExtraAction)
    }

    /// Total hits an Attack lands.
    #[must_use]
    pub fn hit_count(&self) -> u32 {
        self.ops
            .iter()
            .filter_map(|op| match op {
                EffectOp::Repeat(n) => Some(*n),
                _ => None,
            })
            .fold(1u32, u32::saturating_add)
    }

    /// Intent preview shown while the card is pending.
    #[must_use]
    pub fn intent_value(&self) -> i64 {
        self.value.unwrap_or(0)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{:?}, {}]", self.name, self.kind, self.cost)
    }
}
