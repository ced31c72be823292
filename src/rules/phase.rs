//! Battle phases and outcomes.

use serde::{Deserialize, Serialize};

/// Result of a finished battle, from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl std::fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleOutcome::Win => write!(f, "victory"),
            BattleOutcome::Loss => write!(f, "defeat"),
        }
    }
}

/// Where the battle is in its turn cycle.
///
/// ```text
/// PlayerTurn -> EnemyResolving -> EnemyTurn -> PlayerResolving -> PlayerTurn
/// ```
///
/// Any phase may jump to `BattleOver` when a combatant reaches 0 health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The player may play cards or end the turn.
    PlayerTurn,
    /// Player turn ended; enemy start-of-turn effects are next.
    EnemyResolving,
    /// The enemy's telegraphed move is next.
    EnemyTurn,
    /// Enemy finished; player start-of-turn effects and draw are next.
    PlayerResolving,
    /// Terminal.
    BattleOver(BattleOutcome),
}

impl Phase {
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Phase::BattleOver(_))
    }

    /// Phases that [`crate::rules::Battle::advance`] moves through.
    #[must_use]
    pub fn is_enemy_phase(self) -> bool {
        matches!(
            self,
            Phase::EnemyResolving | Phase::EnemyTurn | Phase::PlayerResolving
        )
    }

    #[must_use]
    pub fn outcome(self) -> Option<BattleOutcome> {
        match self {
            Phase::BattleOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_queries() {
        assert!(!Phase::PlayerTurn.is_enemy_phase());
        assert!(Phase::EnemyTurn.is_enemy_phase());
        assert!(Phase::BattleOver(BattleOutcome::Win).is_over());
        assert_eq!(
            Phase::BattleOver(BattleOutcome::Loss).outcome(),
            Some(BattleOutcome::Loss)
        );
        assert_eq!(Phase::PlayerResolving.outcome(), None);
    }
}
