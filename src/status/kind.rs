//! Status kinds and their static properties.

use serde::{Deserialize, Serialize};

/// A named, stacking modifier attached to a combatant.
///
/// Declaration order is the canonical display and iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Player loses a fixed amount of health at end of turn and draws one fewer card.
    Overtime,
    /// Lose magnitude health at end of the owner's turn.
    Poison,
    /// Heal magnitude at end of the owner's turn.
    Regen,
    /// Reflect magnitude damage when hit by an Attack.
    Thorns,
    /// Skip the owner's action.
    Stun,
    /// Negate the next incoming hit.
    Dodge,
    /// Flat bonus (or malus) to outgoing damage.
    Strength,
    /// Take 50% more damage.
    Vulnerable,
    /// Deal 25% less damage.
    Weak,
    /// Opposing heals are redirected as damage to the healer.
    CounterHeal,
    /// Attack cards cannot be played.
    SilenceAttack,
    /// At most magnitude cards may be played per turn. Re-applying keeps the
    /// tighter limit.
    CardLimit,
    /// Card costs increase by magnitude.
    CostUp,
    /// Opponent takes magnitude true damage for each non-Attack card it plays.
    TrueDmgOnPlay,
    /// Gain magnitude shield at the start of the owner's turn.
    Fortify,
    /// Incoming hits are reduced by magnitude.
    Plating,
    /// Both combatants lose magnitude health at the start of the holder's turn.
    Involution,
    /// The owner's next energy refill is reduced by magnitude.
    EnergyDrain,
}

/// When the turn machine ticks a status down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decay {
    /// Never ticks; removed only by effects.
    Persistent,
    /// One stack at the end of the owner's turn.
    TurnEnd,
    /// One stack at the start of the owner's turn.
    TurnStart,
    /// Spent by the mechanic that reads it (Dodge, EnergyDrain).
    OnUse,
}

/// Whether a status helps or hurts its holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Buff,
    Debuff,
    /// Affects the opponent rather than the holder.
    Stance,
}

impl StatusKind {
    /// Every kind, in canonical order.
    pub const ALL: [StatusKind; 18] = [
        StatusKind::Overtime,
        StatusKind::Poison,
        StatusKind::Regen,
        StatusKind::Thorns,
        StatusKind::Stun,
        StatusKind::Dodge,
        StatusKind::Strength,
        StatusKind::Vulnerable,
        StatusKind::Weak,
        StatusKind::CounterHeal,
        StatusKind::SilenceAttack,
        StatusKind::CardLimit,
        StatusKind::CostUp,
        StatusKind::TrueDmgOnPlay,
        StatusKind::Fortify,
        StatusKind::Plating,
        StatusKind::Involution,
        StatusKind::EnergyDrain,
    ];

    /// Signed stat modifiers may go negative; everything else floors at 0.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, StatusKind::Strength)
    }

    /// Caps merge by keeping the smaller positive magnitude instead of adding.
    #[must_use]
    pub const fn is_cap(self) -> bool {
        matches!(self, StatusKind::CardLimit)
    }

    #[must_use]
    pub const fn decay(self) -> Decay {
        match self {
            StatusKind::Overtime
            | StatusKind::Poison
            | StatusKind::Regen
            | StatusKind::Stun
            | StatusKind::Vulnerable
            | StatusKind::Weak
            | StatusKind::SilenceAttack
            | StatusKind::CostUp => Decay::TurnEnd,
            StatusKind::CounterHeal => Decay::TurnStart,
            StatusKind::Dodge | StatusKind::EnergyDrain => Decay::OnUse,
            StatusKind::Thorns
            | StatusKind::Strength
            | StatusKind::CardLimit
            | StatusKind::TrueDmgOnPlay
            | StatusKind::Fortify
            | StatusKind::Plating
            | StatusKind::Involution => Decay::Persistent,
        }
    }

    /// Polarity for a given magnitude. Strength flips with its sign.
    #[must_use]
    pub const fn polarity(self, magnitude: i64) -> Polarity {
        match self {
            StatusKind::Strength => {
                if magnitude < 0 {
                    Polarity::Debuff
                } else {
                    Polarity::Buff
                }
            }
            StatusKind::Overtime
            | StatusKind::Poison
            | StatusKind::Stun
            | StatusKind::Vulnerable
            | StatusKind::Weak
            | StatusKind::SilenceAttack
            | StatusKind::CardLimit
            | StatusKind::CostUp
            | StatusKind::EnergyDrain => Polarity::Debuff,
            StatusKind::Thorns
            | StatusKind::Dodge
            | StatusKind::Regen
            | StatusKind::Fortify
            | StatusKind::Plating => Polarity::Buff,
            StatusKind::CounterHeal | StatusKind::TrueDmgOnPlay | StatusKind::Involution => {
                Polarity::Stance
            }
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StatusKind::Overtime => "Overtime",
            StatusKind::Poison => "Poison",
            StatusKind::Regen => "Regen",
            StatusKind::Thorns => "Thorns",
            StatusKind::Stun => "Stun",
            StatusKind::Dodge => "Dodge",
            StatusKind::Strength => "Strength",
            StatusKind::Vulnerable => "Vulnerable",
            StatusKind::Weak => "Weak",
            StatusKind::CounterHeal => "Expense Rejected",
            StatusKind::SilenceAttack => "Weapons Ban",
            StatusKind::CardLimit => "Budget Freeze",
            StatusKind::CostUp => "Pay Cut",
            StatusKind::TrueDmgOnPlay => "Values Review",
            StatusKind::Fortify => "Fortify",
            StatusKind::Plating => "Plating",
            StatusKind::Involution => "Involution",
            StatusKind::EnergyDrain => "Energy Drain",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_and_complete() {
        let mut sorted = StatusKind::ALL;
        sorted.sort();
        assert_eq!(sorted, StatusKind::ALL);
        assert_eq!(StatusKind::ALL.len(), 18);
    }

    #[test]
    fn test_only_strength_is_signed() {
        let signed: Vec<_> = StatusKind::ALL.iter().filter(|k| k.is_signed()).collect();
        assert_eq!(signed, vec![&StatusKind::Strength]);
    }

    #[test]
    fn test_only_card_limit_is_cap() {
        let caps: Vec<_> = StatusKind::ALL.iter().filter(|k| k.is_cap()).collect();
        assert_eq!(caps, vec![&StatusKind::CardLimit]);
    }

    #[test]
    fn test_strength_polarity_follows_sign() {
        assert_eq!(StatusKind::Strength.polarity(3), Polarity::Buff);
        assert_eq!(StatusKind::Strength.polarity(-2), Polarity::Debuff);
    }

    #[test]
    fn test_decay_schedule() {
        assert_eq!(StatusKind::Poison.decay(), Decay::TurnEnd);
        assert_eq!(StatusKind::CounterHeal.decay(), Decay::TurnStart);
        assert_eq!(StatusKind::Dodge.decay(), Decay::OnUse);
        assert_eq!(StatusKind::Thorns.decay(), Decay::Persistent);
    }
}
