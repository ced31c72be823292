//! # factory-storm
//!
//! A turn-based card battle engine: one player with a deck against one
//! adversary with a telegraphed move pool.
//!
//! ## Design Principles
//!
//! 1. **One Resolver**: player and adversary cards go through the same
//!    fixed-order pipeline (`effects::CardResolver`).
//!
//! 2. **Data-Driven Cards**: special behavior is a closed set of
//!    `EffectOp`s on the card value, never code keyed by card id.
//!
//! 3. **Deterministic**: every random draw comes from an injected, seeded
//!    `GameRng`; the same seed and inputs replay the same battle.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: piles and history use `im` vectors, so
//!   cloning a `BattleState` for snapshots is cheap.
//!
//! - **Clamp, Don't Fail**: health, shield, energy and currency clamp to
//!   their ranges. Rejected actions return `Rejection` and change nothing.
//!
//! ## Modules
//!
//! - `core`: combatants, state, actions, RNG, configuration, errors
//! - `status`: status kinds and the per-combatant table
//! - `cards`: card definitions, effect ops, registry, built-in catalog
//! - `zones`: the player's draw pile, hand and discard pile
//! - `effects`: card resolution and narration
//! - `policy`: adversary move selection
//! - `rules`: the battle turn machine
//! - `taunt`: async narrative collaborator with fallback

pub mod core;
pub mod status;
pub mod cards;
pub mod zones;
pub mod effects;
pub mod policy;
pub mod rules;
pub mod taunt;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord,
    BattleConfig, BattleState,
    Combatant, PlayerProfile, Side,
    GameRng, GameRngState,
    CatalogError, ConfigError, Rejection, SnapshotError,
};

pub use crate::status::{StatusKind, StatusTable};

pub use crate::cards::{Card, CardId, CardKind, CardRegistry, EffectOp};

pub use crate::zones::Piles;

pub use crate::effects::{BattleLog, CardResolver, Narration, Resolution};

pub use crate::policy::{AdversaryPolicy, PolicyContext, PriorityPolicy, UniformPolicy};

pub use crate::rules::{Battle, BattleOutcome, Phase};

pub use crate::taunt::{PlayerSnapshot, ScriptedTaunts, TauntBoard, TauntSource};
