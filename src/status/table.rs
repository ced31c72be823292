//! Status table: per-combatant status magnitudes.
//!
//! The table is pure data plus merge/decay rules. It never interprets a
//! status; the resolver and the turn machine decide what a magnitude means.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::kind::{Decay, Polarity, StatusKind};

/// Mapping from status kind to magnitude. Absent kinds read as 0.
///
/// ```
/// use factory_storm::status::{StatusKind, StatusTable};
///
/// let mut table = StatusTable::new();
/// table.apply(StatusKind::Poison, 3);
/// table.apply(StatusKind::Poison, -5);
/// assert_eq!(table.get(StatusKind::Poison), 0);
/// assert!(!table.has(StatusKind::Poison));
///
/// table.apply(StatusKind::Strength, -2);
/// assert_eq!(table.get(StatusKind::Strength), -2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    entries: FxHashMap<StatusKind, i64>,
}

impl StatusTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the stack and return the new magnitude.
    ///
    /// Count statuses floor at 0; a magnitude of exactly 0 removes the entry.
    /// A cap already in place keeps the smaller of the two limits.
    pub fn apply(&mut self, kind: StatusKind, delta: i64) -> i64 {
        let current = self.get(kind);
        let mut next = if kind.is_cap() && current > 0 && delta > 0 {
            current.min(delta)
        } else {
            current.saturating_add(delta)
        };
        if !kind.is_signed() {
            next = next.max(0);
        }
        self.set(kind, next);
        next
    }

    /// Current magnitude, without mutating.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> i64 {
        self.entries.get(&kind).copied().unwrap_or(0)
    }

    /// Whether the kind has a non-zero magnitude.
    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind) != 0
    }

    /// Spend one stack if present. Returns whether a stack was spent.
    pub fn take_one(&mut self, kind: StatusKind) -> bool {
        if self.get(kind) > 0 {
            self.tick(kind);
            true
        } else {
            false
        }
    }

    /// Decrement by one stack; remove at 0. Absent kinds stay absent.
    pub fn tick(&mut self, kind: StatusKind) {
        let current = self.get(kind);
        if current > 0 {
            self.set(kind, current - 1);
        } else if current < 0 {
            // Signed modifiers decay toward zero.
            self.set(kind, current + 1);
        }
    }

    /// Tick every present kind with the given decay schedule.
    ///
    /// Returns the kinds that were ticked.
    pub fn tick_all(&mut self, decay: Decay) -> Vec<StatusKind> {
        let due: Vec<StatusKind> = self
            .iter()
            .map(|(kind, _)| kind)
            .filter(|kind| kind.decay() == decay)
            .collect();
        for &kind in &due {
            self.tick(kind);
        }
        due
    }

    /// Remove a kind entirely and return its former magnitude.
    pub fn remove(&mut self, kind: StatusKind) -> i64 {
        self.entries.remove(&kind).unwrap_or(0)
    }

    /// Set a magnitude directly. Zero removes the entry.
    pub fn set(&mut self, kind: StatusKind, magnitude: i64) {
        if magnitude == 0 {
            self.entries.remove(&kind);
        } else {
            self.entries.insert(kind, magnitude);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Present entries in canonical kind order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusKind, i64)> + '_ {
        let mut entries: Vec<_> = self.entries.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries.into_iter()
    }

    /// Present debuffs in canonical order.
    #[must_use]
    pub fn debuffs(&self) -> Vec<StatusKind> {
        self.with_polarity(Polarity::Debuff)
    }

    /// Present buffs in canonical order.
    #[must_use]
    pub fn buffs(&self) -> Vec<StatusKind> {
        self.with_polarity(Polarity::Buff)
    }

    #[must_use]
    pub fn has_debuff(&self) -> bool {
        self.entries
            .iter()
            .any(|(k, &v)| k.polarity(v) == Polarity::Debuff)
    }

    fn with_polarity(&self, polarity: Polarity) -> Vec<StatusKind> {
        self.iter()
            .filter(|(k, v)| k.polarity(*v) == polarity)
            .map(|(k, _)| k)
            .collect()
    }
}
