//! Status effects: kinds, decay schedules and the per-combatant table.
//!
//! ## Key Types
//!
//! - `StatusKind`: closed set of statuses, in canonical order
//! - `Decay`: when the turn machine ticks a kind
//! - `Polarity`: buff / debuff / stance classification
//! - `StatusTable`: magnitude map with floor and removal rules

pub mod kind;
pub mod table;

pub use kind::{Decay, Polarity, StatusKind};
pub use table::StatusTable;
