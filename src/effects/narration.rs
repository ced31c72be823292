//! Structured battle narration and the append-only battle log.
//!
//! The resolver and the turn machine emit `Narration` events; the battle
//! renders them into the `BattleLog` with the combatants' display names.
//! Narration is presentation data and is kept apart from `tracing`
//! diagnostics.

use serde::{Deserialize, Serialize};

use crate::core::{Rejection, Side};
use crate::rules::BattleOutcome;
use crate::status::StatusKind;

/// One observable thing that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Narration {
    BattleStarted { enemy: String },
    TurnStarted { number: u32 },
    Intent { card: String, value: i64 },
    Played { actor: Side, card: String },
    CostPaid { actor: Side, amount: i64 },
    Healed { side: Side, amount: i64 },
    /// A heal turned into damage by a counter-heal stance.
    HealRedirected { side: Side, amount: i64 },
    /// True damage from an on-play stance.
    PlayPenalty { side: Side, amount: i64 },
    ShieldGained { side: Side, amount: i64 },
    ShieldConsumed { side: Side, amount: i64 },
    ShieldStripped { side: Side, amount: i64 },
    ShieldHalved { side: Side, remaining: i64 },
    Dodged { side: Side },
    Damaged { side: Side, amount: i64, absorbed: i64 },
    Reflected { side: Side, amount: i64 },
    Executed { side: Side },
    SelfDamage { side: Side, amount: i64 },
    StatusApplied { side: Side, kind: StatusKind, delta: i64, total: i64 },
    StatusRemoved { side: Side, kinds: Vec<StatusKind> },
    BuffsStolen { from: Side, kinds: Vec<StatusKind> },
    Drew { count: usize },
    EnergyGained { side: Side, amount: i64 },
    CardShuffledIn { side: Side, card: String },
    Discarded { count: usize },
    CurrencyChanged { side: Side, amount: i64 },
    /// Turn-boundary status effect (poison, regen, overtime, involution).
    StatusTriggered { side: Side, kind: StatusKind, amount: i64 },
    Stunned { side: Side },
    ExtraAction { side: Side },
    Rejected(Rejection),
    Taunt(String),
    BattleEnded(BattleOutcome),
}

impl Narration {
    /// Render one log line.
    #[must_use]
    pub fn render(&self, player: &str, enemy: &str) -> String {
        let name = |side: &Side| match side {
            Side::Player => player,
            Side::Enemy => enemy,
        };
        match self {
            Narration::BattleStarted { enemy } => format!(">>> Battle: {enemy} <<<"),
            Narration::TurnStarted { number } => format!("--- Turn {number} ---"),
            Narration::Intent { card, value } if *value > 0 => {
                format!("{enemy} prepares {card} ({value})")
            }
            Narration::Intent { card, .. } => format!("{enemy} prepares {card}"),
            Narration::Played { actor, card } => format!("{} plays {card}", name(actor)),
            Narration::CostPaid { actor, amount } => {
                format!("{} spends {amount} energy", name(actor))
            }
            Narration::Healed { side, amount } => format!("{} heals {amount}", name(side)),
            Narration::HealRedirected { side, amount } => {
                format!("Heal rejected! {} takes {amount} damage instead", name(side))
            }
            Narration::PlayPenalty { side, amount } => {
                format!("{} takes {amount} true damage for breaking rank", name(side))
            }
            Narration::ShieldGained { side, amount } => {
                format!("{} gains {amount} shield", name(side))
            }
            Narration::ShieldConsumed { side, amount } => {
                format!("{} pours {amount} shield into the blow", name(side))
            }
            Narration::ShieldStripped { side, amount } => {
                format!("{} loses all {amount} shield", name(side))
            }
            Narration::ShieldHalved { side, remaining } => {
                format!("{}'s shield is halved to {remaining}", name(side))
            }
            Narration::Dodged { side } => format!("{} dodges!", name(side)),
            Narration::Damaged {
                side,
                amount,
                absorbed,
            } if *absorbed > 0 => {
                format!("{} takes {amount} damage ({absorbed} blocked)", name(side))
            }
            Narration::Damaged { side, amount, .. } => {
                format!("{} takes {amount} damage", name(side))
            }
            Narration::Reflected { side, amount } => {
                format!("Thorns! {} takes {amount} reflected damage", name(side))
            }
            Narration::Executed { side } => format!("{} is finished off!", name(side)),
            Narration::SelfDamage { side, amount } => {
                format!("{} pays {amount} health", name(side))
            }
            Narration::StatusApplied {
                side,
                kind,
                delta,
                total,
            } => format!("{} {kind} {delta:+} (now {total})", name(side)),
            Narration::StatusRemoved { side, kinds } => {
                format!("{} shakes off {}", name(side), join(kinds))
            }
            Narration::BuffsStolen { from, kinds } => {
                format!("{} has {} stolen", name(from), join(kinds))
            }
            Narration::Drew { count } => format!("{player} draws {count}"),
            Narration::EnergyGained { side, amount } => {
                format!("{} gains {amount} energy", name(side))
            }
            Narration::CardShuffledIn { side, card } => {
                format!("{card} is shuffled into {}'s draw pile", name(side))
            }
            Narration::Discarded { count } => format!("{player} discards {count}"),
            Narration::CurrencyChanged { side, amount } if *amount < 0 => {
                format!("{} loses {} coins", name(side), -amount)
            }
            Narration::CurrencyChanged { side, amount } => {
                format!("{} gains {amount} coins", name(side))
            }
            Narration::StatusTriggered { side, kind, amount } => {
                format!("{kind}: {} {amount:+} health", name(side))
            }
            Narration::Stunned { side } => format!("{} is stunned and loses the turn", name(side)),
            Narration::ExtraAction { side } => format!("{} acts again!", name(side)),
            Narration::Rejected(reason) => format!("Cannot play: {reason}"),
            Narration::Taunt(line) => format!("{enemy}: \"{line}\""),
            Narration::BattleEnded(BattleOutcome::Win) => format!("{enemy} is defeated. Victory!"),
            Narration::BattleEnded(BattleOutcome::Loss) => format!("{player} collapses. Defeat."),
        }
    }
}

fn join(kinds: &[StatusKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append-only battle narration.
///
/// ```
/// use factory_storm::effects::BattleLog;
///
/// let mut log = BattleLog::new();
/// log.push("one");
/// log.push("two");
/// log.push("three");
/// assert_eq!(log.recent(2), ["two", "three"]);
/// assert_eq!(log.len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    lines: Vec<String>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Render and append events.
    pub fn extend<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a Narration>,
        player: &str,
        enemy: &str,
    ) {
        self.lines
            .extend(events.into_iter().map(|e| e.render(player, enemy)));
    }

    /// The last `n` lines, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_uses_names() {
        let line = Narration::Damaged {
            side: Side::Enemy,
            amount: 5,
            absorbed: 0,
        }
        .render("Star PM", "HR Matron");
        assert_eq!(line, "HR Matron takes 5 damage");
    }

    #[test]
    fn test_render_absorbed() {
        let line = Narration::Damaged {
            side: Side::Player,
            amount: 3,
            absorbed: 7,
        }
        .render("Star PM", "HR Matron");
        assert_eq!(line, "Star PM takes 3 damage (7 blocked)");
    }

    #[test]
    fn test_render_redirect() {
        let line = Narration::HealRedirected {
            side: Side::Player,
            amount: 5,
        }
        .render("Star PM", "Finance");
        assert!(line.contains("Heal rejected"));
        assert!(line.contains("5"));
    }

    #[test]
    fn test_render_rejection() {
        let line = Narration::Rejected(Rejection::Stunned).render("P", "E");
        assert_eq!(line, "Cannot play: stunned: cannot act this turn");
    }

    #[test]
    fn test_recent_window() {
        let mut log = BattleLog::new();
        assert!(log.recent(3).is_empty());
        log.extend(
            &[Narration::TurnStarted { number: 1 }, Narration::Drew { count: 2 }],
            "P",
            "E",
        );
        assert_eq!(log.recent(10).len(), 2);
        assert_eq!(log.recent(1), ["P draws 2"]);
        assert!(log.contains("Turn 1"));
    }
}
