//! Card system: definitions, effect ops, registry and built-in catalog.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for card definitions
//! - `Card`: immutable card value (kind, cost, numbers, status payload, ops)
//! - `EffectOp`: closed set of special effects the resolver runs
//! - `CardRegistry`: validated lookup, loadable from JSON
//!
//! The `catalog` module holds the shipped content: player classes,
//! adversaries and junk cards.

pub mod catalog;
pub mod definition;
pub mod ops;
pub mod registry;

pub use definition::{Card, CardId, CardKind, StatusPayload, StatusTarget};
pub use ops::{Condition, EffectOp};
pub use registry::CardRegistry;
