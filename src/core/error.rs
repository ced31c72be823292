//! Error types.
//!
//! Three families, matching how callers are expected to react:
//!
//! - [`Rejection`]: an action the caller may retry with a different choice.
//!   Nothing was mutated.
//! - [`CatalogError`] / [`ConfigError`]: authoring defects in trusted data.
//!   These are fatal at load time.
//! - [`SnapshotError`]: encoding failures for battle snapshots.
//!
//! Collaborator failures (the taunt service) never surface here; they are
//! absorbed in [`crate::taunt`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;

/// A rejected player action. No state was changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Rejection {
    /// It is not the player's turn.
    #[error("not the player's turn")]
    NotPlayerTurn,

    /// The battle has already ended.
    #[error("the battle is over")]
    BattleOver,

    /// No card at that hand position.
    #[error("no card at hand position {0}")]
    NoSuchCard(usize),

    /// Effective cost exceeds current energy.
    #[error("not enough energy: need {needed}, have {available}")]
    InsufficientEnergy { needed: i64, available: i64 },

    /// The per-turn play limit is exhausted.
    #[error("play limit of {limit} cards reached this turn")]
    PlayLimitReached { limit: i64 },

    /// The actor is stunned.
    #[error("stunned: cannot act this turn")]
    Stunned,

    /// Attack cards are silenced.
    #[error("attacks are silenced")]
    Silenced,

    /// Status cards cannot be played.
    #[error("{0} cannot be played")]
    Unplayable(CardId),
}

/// Malformed card catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two cards share an id.
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),

    /// A card's numeric fields are out of range.
    #[error("invalid card {id}: {reason}")]
    InvalidCard { id: CardId, reason: String },

    /// A name or id does not match any catalog entry.
    #[error("unknown catalog entry: {0}")]
    Unknown(String),
}

/// Unreadable or invalid battle configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// The config document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Snapshot encode/decode failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// bincode rejected the payload.
    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}
