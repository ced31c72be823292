//! Adversary AI.
//!
//! The adversary telegraphs one move ahead. After each executed move the
//! battle asks an `AdversaryPolicy` for the next one.

pub mod adversary;

pub use adversary::{AdversaryPolicy, PolicyContext, PriorityPolicy, UniformPolicy};
