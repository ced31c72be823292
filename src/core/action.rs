//! Battle actions and the action history.
//!
//! An `Action` is what a side did on its turn: play a card, end the turn, or
//! lose the action to a stun. `ActionRecord` stamps it with turn and sequence
//! so a battle can be replayed or inspected afterwards.

use serde::{Deserialize, Serialize};

use super::combatant::Side;
use crate::cards::CardId;

/// One action taken by a side.
///
/// ```
/// use factory_storm::cards::CardId;
/// use factory_storm::core::Action;
///
/// let play = Action::Play(CardId::new(601));
/// assert_eq!(play.card(), Some(CardId::new(601)));
/// assert_eq!(Action::EndTurn.card(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A card was resolved.
    Play(CardId),
    /// The player ended the turn.
    EndTurn,
    /// The action was lost (stunned).
    Skip,
}

impl Action {
    /// The card involved, if any.
    #[must_use]
    pub fn card(self) -> Option<CardId> {
        match self {
            Action::Play(id) => Some(id),
            Action::EndTurn | Action::Skip => None,
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted.
    pub side: Side,

    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(side: Side, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            action,
            turn,
            sequence,
        }
    }
}
