//! Card effects: the resolution pipeline and its narration.
//!
//! - `CardResolver`: validates and resolves one card against `BattleState`
//! - `Resolution`: events, terminal signal and extra-action flag
//! - `Narration` / `BattleLog`: structured events and the rendered log

pub mod narration;
pub mod resolver;

pub use narration::{BattleLog, Narration};
pub use resolver::{CardResolver, Resolution};
