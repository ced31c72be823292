//! Closed set of special card effects.
//!
//! Each variant is one primitive the resolver knows how to run at a fixed
//! step. Catalog data composes them; nothing is looked up by string.

use serde::{Deserialize, Serialize};

/// Most extra hits a single card may carry.
pub const MAX_REPEAT: u32 = 10;

/// Trigger for a conditional damage multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// The target currently holds at least one debuff.
    TargetHasDebuff,
    /// The actor's health is below this percentage of its maximum.
    ActorHealthBelow(i64),
}

/// A special effect carried by a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectOp {
    // === value transforms ===
    /// Base value becomes `percent`% of the actor's shield.
    ScaleByShield { percent: i64, consume: bool },
    /// Target shield is halved (rounded down) before the hit.
    HalveTargetShield,
    /// Target shield is set to 0 before the hit.
    StripShield,
    /// Base value is rolled uniformly from `min..=max`.
    RandomValue { min: i64, max: i64 },

    // === shield ===
    /// Extra shield for the actor regardless of card kind.
    BonusShield(i64),

    // === damage ===
    /// Damage is scaled by `percent`% when the condition holds.
    ConditionalMultiplier { condition: Condition, percent: i64 },
    /// Damage ignores the target's shield.
    Penetrating,
    /// Damage lands `n` extra times.
    Repeat(u32),
    /// After damage, a target below `below_percent`% health drops to 0.
    Execute { below_percent: i64 },
    /// The actor loses this much health, bypassing shield.
    SelfDamage(i64),

    // === statuses ===
    /// Target's next energy refill is reduced.
    DrainEnergy(i64),
    /// Target's poison is doubled.
    DoublePoison,
    /// Remove one random debuff from the actor.
    Cleanse,
    /// Remove every debuff from the actor.
    CleanseAll,
    /// Move every buff from the target to the actor.
    StealBuffs,

    // === piles and currency ===
    /// Shuffle a copy of the played card into the actor's draw pile.
    DuplicateCard,
    /// Shuffle a junk card into the target's draw pile.
    AddJunk,
    /// The actor discards this many random cards from hand.
    DiscardRandom(u32),
    /// The actor discards its hand, then draws this many.
    Wheel(u32),
    /// Take currency from the target.
    StealCurrency(i64),
    /// Gain currency from nowhere.
    GainCurrency(i64),

    // === turn flow ===
    /// The adversary acts again immediately.
    ExtraAction,
}

impl EffectOp {
    /// Reason this op is malformed, if it is.
    #[must_use]
    pub fn defect(&self) -> Option<String> {
        match *self {
            EffectOp::ScaleByShield { percent, .. } if percent < 0 => {
                Some(format!("ScaleByShield percent {percent} is negative"))
            }
            EffectOp::RandomValue { min, max } if min > max || min < 0 => {
                Some(format!("RandomValue range {min}..={max} is empty or negative"))
            }
            EffectOp::ConditionalMultiplier { percent, condition } => {
                if percent < 0 {
                    return Some(format!("multiplier {percent}% is negative"));
                }
                match condition {
                    Condition::ActorHealthBelow(p) if !(0..=100).contains(&p) => {
                        Some(format!("health threshold {p}% is outside 0..=100"))
                    }
                    _ => None,
                }
            }
            EffectOp::Repeat(n) if n > MAX_REPEAT => {
                Some(format!("Repeat({n}) exceeds {MAX_REPEAT} extra hits"))
            }
            EffectOp::Execute { below_percent } if !(0..=100).contains(&below_percent) => {
                Some(format!("execute threshold {below_percent}% is outside 0..=100"))
            }
            EffectOp::BonusShield(n)
            | EffectOp::SelfDamage(n)
            | EffectOp::DrainEnergy(n)
            | EffectOp::StealCurrency(n)
            | EffectOp::GainCurrency(n)
                if n < 0 =>
            {
                Some(format!("{self:?} carries a negative amount"))
            }
            _ => None,
        }
    }
}
