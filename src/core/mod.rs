//! Core battle types: combatants, state, actions, RNG, configuration, errors.
//!
//! Everything above this module (resolver, policy, turn machine) works on
//! `BattleState` and reports through the error types defined here.

pub mod action;
pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use combatant::{Combatant, PlayerProfile, Role, Side};
pub use config::BattleConfig;
pub use error::{CatalogError, ConfigError, Rejection, SnapshotError};
pub use rng::{GameRng, GameRngState};
pub use state::{BattleState, TurnCounters};
