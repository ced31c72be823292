//! Turn state machine.
//!
//! `Battle` drives one fight between the player and an adversary:
//! - whose turn it is (`Phase`)
//! - start and end of turn passives
//! - win/loss detection (`BattleOutcome`)
//!
//! Card effects themselves live in [`crate::effects`]; this module only
//! sequences them.

pub mod battle;
pub mod phase;

pub use battle::Battle;
pub use phase::{BattleOutcome, Phase};
