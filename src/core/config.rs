//! Battle configuration.
//!
//! `BattleConfig` collects the tuning constants the turn machine, the
//! resolver and the adversary policy consult. Defaults reproduce the original
//! game; games may override any field through the builder methods or load a
//! JSON document.
//!
//! ```
//! use factory_storm::core::BattleConfig;
//!
//! let config = BattleConfig::default()
//!     .with_opening_hand(5)
//!     .with_enemy_delay_ms(0);
//!
//! assert_eq!(config.opening_hand, 5);
//! assert_eq!(config.turn_draw, 2);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tuning constants for one battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Cards drawn when the battle starts.
    pub opening_hand: u32,

    /// Cards drawn at the start of every later player turn.
    pub turn_draw: u32,

    /// Player shield above which the adversary prefers piercing moves.
    pub shield_threshold: i64,

    /// Player health fraction below which the adversary prefers finishers.
    pub execute_fraction: f64,

    /// Chance the adversary answers a Skill with a counter-heal move.
    pub counter_heal_chance: f64,

    /// Health lost by an Overtime-afflicted player at end of turn.
    pub overtime_drain: i64,

    /// Pause between enemy-phase beats when paced (presentation only).
    pub enemy_delay_ms: u64,

    /// How long the taunt collaborator may take before the fallback is used.
    pub taunt_timeout_ms: u64,

    /// How many recent narration lines a presentation layer should show.
    pub log_window: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            opening_hand: 4,
            turn_draw: 2,
            shield_threshold: 15,
            execute_fraction: 0.30,
            counter_heal_chance: 0.5,
            overtime_drain: 5,
            enemy_delay_ms: 1000,
            taunt_timeout_ms: 3000,
            log_window: 6,
        }
    }
}

impl BattleConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.execute_fraction) {
            return Err(ConfigError::Invalid(format!(
                "execute_fraction must be within 0..=1, got {}",
                self.execute_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.counter_heal_chance) {
            return Err(ConfigError::Invalid(format!(
                "counter_heal_chance must be within 0..=1, got {}",
                self.counter_heal_chance
            )));
        }
        if self.shield_threshold < 0 || self.overtime_drain < 0 {
            return Err(ConfigError::Invalid(
                "shield_threshold and overtime_drain must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Pause between enemy-phase beats.
    #[must_use]
    pub fn enemy_delay(&self) -> Duration {
        Duration::from_millis(self.enemy_delay_ms)
    }

    /// Budget for the taunt collaborator.
    #[must_use]
    pub fn taunt_timeout(&self) -> Duration {
        Duration::from_millis(self.taunt_timeout_ms)
    }

    #[must_use]
    pub fn with_opening_hand(mut self, cards: u32) -> Self {
        self.opening_hand = cards;
        self
    }

    #[must_use]
    pub fn with_turn_draw(mut self, cards: u32) -> Self {
        self.turn_draw = cards;
        self
    }

    #[must_use]
    pub fn with_shield_threshold(mut self, threshold: i64) -> Self {
        self.shield_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_execute_fraction(mut self, fraction: f64) -> Self {
        self.execute_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_counter_heal_chance(mut self, chance: f64) -> Self {
        self.counter_heal_chance = chance;
        self
    }

    #[must_use]
    pub fn with_overtime_drain(mut self, drain: i64) -> Self {
        self.overtime_drain = drain;
        self
    }

    #[must_use]
    pub fn with_enemy_delay_ms(mut self, millis: u64) -> Self {
        self.enemy_delay_ms = millis;
        self
    }

    #[must_use]
    pub fn with_taunt_timeout_ms(mut self, millis: u64) -> Self {
        self.taunt_timeout_ms = millis;
        self
    }
}
