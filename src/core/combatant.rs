//! Combatants: one record shape for both sides of a battle.
//!
//! ## Side
//!
//! `Side` names a participant relative to the battle (`Player` / `Enemy`).
//! The resolver works in terms of an actor side and its opponent, so the same
//! pipeline runs for both.
//!
//! ## Invariants
//!
//! `0 <= health <= max_health`, `0 <= energy <= max_energy`, `shield >= 0`.
//! Every mutation goes through a clamping helper; the numeric fields are not
//! public.

use serde::{Deserialize, Serialize};

use crate::cards::catalog::{EnemyTemplate, PlayerClass};
use crate::cards::Card;
use crate::status::StatusTable;

/// One side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Enemy => write!(f, "Enemy"),
        }
    }
}

/// Role-specific data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player {
        /// Persistent deck the battle piles are built from.
        deck: Vec<Card>,
        /// Meta-resource carried between battles.
        currency: i64,
    },
    Enemy {
        move_pool: Vec<Card>,
        /// Telegraphed intent for the next enemy turn.
        pending_move: Option<Card>,
    },
}

/// Persistent out-of-battle player record.
///
/// A battle starts from a profile and hands an updated one back: health and
/// currency carry over, everything else is battle-scoped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub class: PlayerClass,
    pub max_health: i64,
    pub health: i64,
    pub max_energy: i64,
    pub deck: Vec<Card>,
    pub currency: i64,
}

/// A participant in a battle.
///
/// ```
/// use factory_storm::core::Combatant;
/// use factory_storm::cards::catalog::PlayerClass;
///
/// let mut player = Combatant::player(&PlayerClass::Pm.profile()).with_shield(10);
///
/// // Shield soaks damage first.
/// let through = player.absorb(15);
/// assert_eq!(through, 5);
/// assert_eq!(player.shield(), 0);
///
/// player.lose_health(500);
/// assert_eq!(player.health(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    max_health: i64,
    health: i64,
    max_energy: i64,
    energy: i64,
    shield: i64,
    pub statuses: StatusTable,
    pub role: Role,
}

impl Combatant {
    /// Battle-start player: energy full, shield 0, no statuses.
    #[must_use]
    pub fn player(profile: &PlayerProfile) -> Self {
        let max_health = profile.max_health.max(1);
        Self {
            name: profile.name.clone(),
            max_health,
            health: profile.health.clamp(0, max_health),
            max_energy: profile.max_energy.max(0),
            energy: profile.max_energy.max(0),
            shield: 0,
            statuses: StatusTable::new(),
            role: Role::Player {
                deck: profile.deck.clone(),
                currency: profile.currency.max(0),
            },
        }
    }

    /// Battle-start enemy with no intent selected yet.
    #[must_use]
    pub fn enemy(template: &EnemyTemplate) -> Self {
        let max_health = template.max_health.max(1);
        Self {
            name: template.name.clone(),
            max_health,
            health: max_health,
            max_energy: template.max_energy.max(0),
            energy: template.max_energy.max(0),
            shield: 0,
            statuses: StatusTable::new(),
            role: Role::Enemy {
                move_pool: template.move_pool.clone(),
                pending_move: None,
            },
        }
    }

    // === builders for setting up positions ===

    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = health.clamp(0, self.max_health);
        self
    }

    #[must_use]
    pub fn with_shield(mut self, shield: i64) -> Self {
        self.shield = shield.max(0);
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy = energy.clamp(0, self.max_energy);
        self
    }

    // === reads ===

    #[must_use]
    pub fn health(&self) -> i64 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.max_health
    }

    #[must_use]
    pub fn energy(&self) -> i64 {
        self.energy
    }

    #[must_use]
    pub fn max_energy(&self) -> i64 {
        self.max_energy
    }

    #[must_use]
    pub fn shield(&self) -> i64 {
        self.shield
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    /// Health as a fraction of maximum.
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        self.health as f64 / self.max_health as f64
    }

    /// `health < max_health * percent / 100`, without rounding.
    #[must_use]
    pub fn health_below_percent(&self, percent: i64) -> bool {
        self.health * 100 < self.max_health * percent
    }

    // === clamped mutation ===

    /// Lose health, bypassing shield. Returns the amount actually lost.
    pub fn lose_health(&mut self, amount: i64) -> i64 {
        let lost = amount.max(0).min(self.health);
        self.health -= lost;
        lost
    }

    /// Heal up to max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let healed = amount.max(0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Drop straight to 0 health.
    pub fn defeat(&mut self) {
        self.health = 0;
    }

    /// Gain energy up to max. Returns the amount actually gained.
    pub fn gain_energy(&mut self, amount: i64) -> i64 {
        let gained = amount.max(0).min(self.max_energy - self.energy);
        self.energy += gained;
        gained
    }

    /// Spend energy, flooring at 0.
    pub fn spend_energy(&mut self, amount: i64) {
        self.energy = (self.energy - amount.max(0)).max(0);
    }

    /// Refill to max minus `drain`.
    pub fn refill_energy(&mut self, drain: i64) {
        self.energy = (self.max_energy - drain.max(0)).max(0);
    }

    pub fn gain_shield(&mut self, amount: i64) {
        self.shield += amount.max(0);
    }

    pub fn set_shield(&mut self, shield: i64) {
        self.shield = shield.max(0);
    }

    /// Soak `damage` with shield. Returns what gets through.
    pub fn absorb(&mut self, damage: i64) -> i64 {
        let damage = damage.max(0);
        let absorbed = self.shield.min(damage);
        self.shield -= absorbed;
        damage - absorbed
    }

    // === role data ===

    /// Player currency; 0 for enemies.
    #[must_use]
    pub fn currency(&self) -> i64 {
        match &self.role {
            Role::Player { currency, .. } => *currency,
            Role::Enemy { .. } => 0,
        }
    }

    /// Change currency, flooring at 0. Returns the applied delta.
    ///
    /// Enemies hold no currency; the call is a no-op for them.
    pub fn adjust_currency(&mut self, delta: i64) -> i64 {
        match &mut self.role {
            Role::Player { currency, .. } => {
                let before = *currency;
                *currency = (before + delta).max(0);
                *currency - before
            }
            Role::Enemy { .. } => 0,
        }
    }

    /// The enemy's telegraphed move.
    #[must_use]
    pub fn pending_move(&self) -> Option<&Card> {
        match &self.role {
            Role::Enemy { pending_move, .. } => pending_move.as_ref(),
            Role::Player { .. } => None,
        }
    }

    /// Replace the telegraphed move, returning the old one.
    pub fn set_pending_move(&mut self, next: Option<Card>) -> Option<Card> {
        match &mut self.role {
            Role::Enemy { pending_move, .. } => std::mem::replace(pending_move, next),
            Role::Player { .. } => None,
        }
    }

    /// The enemy's move pool; empty for the player.
    #[must_use]
    pub fn move_pool(&self) -> &[Card] {
        match &self.role {
            Role::Enemy { move_pool, .. } => move_pool,
            Role::Player { .. } => &[],
        }
    }

    /// The player's persistent deck; empty for enemies.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        match &self.role {
            Role::Player { deck, .. } => deck,
            Role::Enemy { .. } => &[],
        }
    }
}
