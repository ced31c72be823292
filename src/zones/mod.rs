//! Card locations for a battle.
//!
//! Only the player keeps piles; the adversary draws from a move pool held on
//! its combatant record.
//!
//! ## Key Types
//!
//! - `Piles`: draw pile, hand, discard pile and the in-play slot

pub mod piles;

pub use piles::Piles;
