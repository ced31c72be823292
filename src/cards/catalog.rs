//! Built-in content: six player classes, five adversaries, junk.
//!
//! Ids are grouped by owner: 1-9 shared cards, 100s per class, 1000s per
//! adversary. Duplicates created in battle share the id of their source.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardKind, StatusTarget};
use super::ops::{Condition, EffectOp};
use super::registry::CardRegistry;
use crate::core::{CatalogError, PlayerProfile};
use crate::status::StatusKind;

use CardKind::{Attack, Power, Skill};
use StatusTarget::{Opponent, Own};

fn card(id: u32, name: &str, kind: CardKind, cost: i64) -> Card {
    Card::new(CardId::new(id), name, kind, cost)
}

// =============================================================================
// Shared cards
// =============================================================================

pub const BASIC_ATTACK: CardId = CardId(1);
pub const BASIC_DEFEND: CardId = CardId(2);
pub const JUNK: CardId = CardId(8);
pub const CURSE: CardId = CardId(9);

#[must_use]
pub fn basic_attack() -> Card {
    card(1, "Plain Swing", Attack, 1).with_value(6)
}

#[must_use]
pub fn basic_defend() -> Card {
    card(2, "Not My Job", Skill, 1).with_value(5)
}

/// Shuffled into the player's draw pile by `AddJunk`.
#[must_use]
pub fn junk_card() -> Card {
    card(8, "Wild Idea", CardKind::Status, 1)
}

/// Story-event curse; dead weight in the deck.
#[must_use]
pub fn curse_card() -> Card {
    card(9, "Cirrhosis", CardKind::Status, 1)
}

// =============================================================================
// Player classes
// =============================================================================

/// Playable character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Programmer,
    Police,
    Designer,
    Doctor,
    Civil,
    Pm,
}

/// Starting stats for a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassTemplate {
    pub name: &'static str,
    pub max_health: i64,
    pub max_energy: i64,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 6] = [
        PlayerClass::Programmer,
        PlayerClass::Police,
        PlayerClass::Designer,
        PlayerClass::Doctor,
        PlayerClass::Civil,
        PlayerClass::Pm,
    ];

    #[must_use]
    pub const fn template(self) -> ClassTemplate {
        let (name, max_health, max_energy) = match self {
            PlayerClass::Programmer => ("Tireless Programmer", 80, 3),
            PlayerClass::Police => ("Ironclad Detective", 100, 3),
            PlayerClass::Designer => ("Veteran Designer", 60, 5),
            PlayerClass::Doctor => ("Pharma Healer", 70, 4),
            PlayerClass::Civil => ("Site Assassin", 65, 4),
            PlayerClass::Pm => ("Star PM", 75, 3),
        };
        ClassTemplate {
            name,
            max_health,
            max_energy,
        }
    }

    /// Every card belonging to the class.
    #[must_use]
    pub fn cards(self) -> Vec<Card> {
        match self {
            PlayerClass::Programmer => programmer_cards(),
            PlayerClass::Police => police_cards(),
            PlayerClass::Designer => designer_cards(),
            PlayerClass::Doctor => doctor_cards(),
            PlayerClass::Civil => civil_cards(),
            PlayerClass::Pm => pm_cards(),
        }
    }

    /// Deck a new run starts with.
    ///
    /// The PM starts lean; every other class starts with its full card list.
    #[must_use]
    pub fn starter_deck(self) -> Vec<Card> {
        match self {
            PlayerClass::Pm => {
                let cards = pm_cards();
                vec![
                    cards[0].clone(),
                    cards[2].clone(),
                    basic_defend(),
                    basic_defend(),
                    cards[1].clone(),
                ]
            }
            other => other.cards(),
        }
    }

    /// Fresh profile at full health with the starter deck.
    #[must_use]
    pub fn profile(self) -> PlayerProfile {
        let template = self.template();
        PlayerProfile {
            name: template.name.to_string(),
            class: self,
            max_health: template.max_health,
            health: template.max_health,
            max_energy: template.max_energy,
            deck: self.starter_deck(),
            currency: 0,
        }
    }
}

impl FromStr for PlayerClass {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "programmer" => Ok(PlayerClass::Programmer),
            "police" => Ok(PlayerClass::Police),
            "designer" => Ok(PlayerClass::Designer),
            "doctor" => Ok(PlayerClass::Doctor),
            "civil" => Ok(PlayerClass::Civil),
            "pm" => Ok(PlayerClass::Pm),
            _ => Err(CatalogError::Unknown(format!("class '{s}'"))),
        }
    }
}

fn programmer_cards() -> Vec<Card> {
    vec![
        card(101, "Basic Comments", Attack, 1)
            .with_value(6)
            .with_op(EffectOp::BonusShield(3)),
        card(102, "Redundant Code", Skill, 1).with_value(10).with_draw(1),
        card(103, "Infinite Loop", Power, 2).with_status(StatusKind::Thorns, 2, Own),
        card(104, "Refactor Release", Attack, 2).with_op(EffectOp::ScaleByShield {
            percent: 150,
            consume: true,
        }),
        card(105, "Unit Test", Skill, 0)
            .with_draw(2)
            .with_op(EffectOp::DiscardRandom(1)),
        card(106, "Canary Release", Skill, 2)
            .with_value(15)
            .with_status(StatusKind::Overtime, 1, Own),
        card(108, "Fix Bug", Skill, 1).with_heal(5).with_op(EffectOp::Cleanse),
        card(109, "High Concurrency", Skill, 2).with_value(12),
        card(110, "Legacy Spaghetti", Power, 2).with_status(StatusKind::Thorns, 3, Own),
        card(111, "Tech Debt", Attack, 0)
            .with_value(15)
            .with_op(EffectOp::SelfDamage(5)),
        card(112, "Stack Overflow", Skill, 3).with_value(20).with_draw(3),
        card(113, "Drop Database", Attack, 3).with_value(30),
        card(114, "Rollback", Skill, 1).with_value(8).with_draw(2),
        card(115, "Black-box Test", Attack, 1).with_op(EffectOp::RandomValue { min: 5, max: 20 }),
    ]
}

fn police_cards() -> Vec<Card> {
    vec![
        card(201, "Routine Check", Attack, 1)
            .with_value(7)
            .with_status(StatusKind::Weak, 2, Opponent),
        card(202, "All-night Stakeout", Skill, 0)
            .with_draw(2)
            .with_op(EffectOp::SelfDamage(5)),
        card(204, "Iron Fist", Attack, 1)
            .with_value(10)
            .with_op(EffectOp::ConditionalMultiplier {
                condition: Condition::ActorHealthBelow(50),
                percent: 200,
            }),
        card(205, "Takedown", Attack, 1)
            .with_value(6)
            .with_status(StatusKind::Stun, 1, Opponent),
        card(206, "Dispatch", Skill, 1).with_energy(2),
        card(207, "Kevlar Vest", Power, 2).with_status(StatusKind::Fortify, 4, Own),
        card(208, "Burn the Boats", Skill, 2)
            .with_energy(3)
            .with_op(EffectOp::SelfDamage(10)),
        card(209, "Pursuit", Attack, 1).with_value(5).with_draw(1),
        card(211, "Detention", Skill, 2).with_status(StatusKind::Stun, 2, Opponent),
        card(213, "Hard Evidence", Attack, 2).with_value(18),
        card(214, "Undercover", Skill, 1).with_status(StatusKind::Dodge, 1, Own),
        card(215, "Net Closes", Attack, 3)
            .with_value(25)
            .with_op(EffectOp::Execute { below_percent: 25 }),
    ]
}

fn designer_cards() -> Vec<Card> {
    vec![
        card(301, "Color Picker", Skill, 0).with_energy(2),
        card(302, "Colorful Black", Attack, 2)
            .with_value(12)
            .with_status(StatusKind::Strength, -2, Opponent),
        card(304, "Light and Shadow", Attack, 1).with_value(8).with_draw(1),
        card(305, "Pixel Nudge", Skill, 1).with_draw(2),
        card(306, "Golden Ratio", Attack, 2).with_value(15),
        card(307, "Client Taste", Attack, 3)
            .with_value(25)
            .with_op(EffectOp::DiscardRandom(1)),
        card(308, "Lock Layer", Power, 1).with_status(StatusKind::Plating, 2, Own),
        card(309, "Vector Art", Attack, 1)
            .with_value(5)
            .with_op(EffectOp::Repeat(1)),
        card(310, "Asset Raid", Skill, 1).with_energy(3).with_heal(5),
        card(311, "Endless Revisions", Attack, 1)
            .with_value(7)
            .with_op(EffectOp::DuplicateCard),
        card(312, "Final Render", Attack, 4).with_value(40),
        card(313, "Undo", Skill, 1).with_heal(10),
        card(314, "Bloom", Attack, 2)
            .with_value(12)
            .with_status(StatusKind::Stun, 1, Opponent),
        card(315, "Inspiration", Skill, 2).with_draw(4),
    ]
}

fn doctor_cards() -> Vec<Card> {
    vec![
        card(401, "Placebo", Attack, 1).with_value(5).with_heal(3),
        card(402, "Adrenaline", Skill, 1).with_heal(8).with_draw(1),
        card(403, "Doctor-Patient Bond", Power, 2).with_status(StatusKind::Thorns, 5, Own),
        card(404, "Glucose Drip", Skill, 1)
            .with_energy(3)
            .with_status(StatusKind::Regen, 2, Own),
        card(405, "Side Effects", Skill, 1).with_status(StatusKind::Poison, 3, Opponent),
        card(406, "Full Diagnosis", Skill, 0)
            .with_op(EffectOp::StripShield)
            .with_status(StatusKind::Poison, 3, Opponent),
        card(407, "Fight Fire with Fire", Skill, 2).with_op(EffectOp::DoublePoison),
        card(408, "Anesthesia", Skill, 2).with_status(StatusKind::Stun, 2, Opponent),
        card(409, "Last Rally", Power, 3).with_status(StatusKind::Regen, 5, Own),
        card(410, "Overtreatment", Skill, 2).with_heal(20),
        card(411, "Viral Sample", Attack, 1)
            .with_value(6)
            .with_status(StatusKind::Poison, 2, Opponent),
        card(412, "Defibrillate", Skill, 2).with_heal(30),
        card(414, "Prescription", Skill, 1).with_value(15),
        card(415, "Life Drain", Attack, 2).with_value(20).with_heal(20),
    ]
}

fn civil_cards() -> Vec<Card> {
    vec![
        card(501, "Night Pour", Attack, 1)
            .with_value(3)
            .with_op(EffectOp::Repeat(2)),
        card(502, "Bucket and Run", Skill, 1).with_status(StatusKind::Dodge, 1, Own),
        card(503, "Structural Crack", Power, 2).with_status(StatusKind::Vulnerable, 3, Opponent),
        card(504, "Brick Fury", Attack, 1).with_value(12),
        card(505, "Survey Error", Skill, 1).with_status(StatusKind::Dodge, 1, Own),
        card(506, "Site Nap", Skill, 1).with_heal(10).with_energy(1),
        card(507, "Rebar Wrap", Attack, 2)
            .with_value(12)
            .with_status(StatusKind::Stun, 1, Opponent),
        card(509, "Cut Corners", Skill, 0)
            .with_energy(2)
            .with_op(EffectOp::SelfDamage(5)),
        card(510, "Precision Blast", Attack, 3).with_value(35),
        card(511, "Hard Hat", Power, 1).with_value(10),
        card(512, "Final Settlement", Attack, 2)
            .with_value(25)
            .with_op(EffectOp::GainCurrency(50)),
        card(513, "Back Room Deal", Skill, 1).with_draw(3),
        card(514, "Temporary Bracing", Skill, 1).with_value(20),
        card(515, "Back-to-back Shifts", Skill, 2)
            .with_heal(20)
            .with_status(StatusKind::Dodge, 1, Own),
    ]
}

fn pm_cards() -> Vec<Card> {
    vec![
        card(601, "Status Sync", Attack, 1).with_value(8).with_draw(1),
        card(602, "Pie in the Sky", Skill, 1).with_energy(2),
        card(603, "Relentless Chasing", Attack, 2)
            .with_value(15)
            .with_status(StatusKind::Weak, 1, Opponent),
        card(604, "Resource Alignment", Skill, 0).with_draw(2),
        card(605, "Outsource It", Skill, 2).with_status(StatusKind::Poison, 3, Opponent),
        card(606, "Emergency Meeting", Skill, 2).with_status(StatusKind::Stun, 1, Opponent),
        card(607, "Pass the Buck", Skill, 1)
            .with_value(10)
            .with_op(EffectOp::CleanseAll),
        card(608, "PPT Master", Power, 2).with_status(StatusKind::Fortify, 8, Own),
        card(609, "Requirement Change", Skill, 1).with_op(EffectOp::Wheel(5)),
        card(610, "Team Building", Skill, 2).with_heal(20),
        card(611, "Milestone", Power, 3).with_status(StatusKind::Regen, 5, Own),
        card(612, "Performance Review", Attack, 2)
            .with_value(15)
            .with_op(EffectOp::ConditionalMultiplier {
                condition: Condition::TargetHasDebuff,
                percent: 200,
            }),
        card(613, "Agile Sprint", Skill, 1).with_energy(2).with_draw(2),
        card(614, "Budget Cut", Skill, 2).with_status(StatusKind::Weak, 3, Opponent),
        card(615, "IPO Bell", Attack, 5).with_value(60),
    ]
}

// =============================================================================
// Adversaries
// =============================================================================

/// Which adversary a battle is fought against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adversary {
    Normal,
    Hr,
    Finance,
    Client,
    Involution,
}

/// Everything needed to build an enemy combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub max_health: i64,
    pub max_energy: i64,
    pub move_pool: Vec<Card>,
}

impl EnemyTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: i64, move_pool: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            max_health,
            max_energy: ENEMY_MAX_ENERGY,
            move_pool,
        }
    }
}

const ENEMY_MAX_ENERGY: i64 = 10;

impl Adversary {
    pub const ALL: [Adversary; 5] = [
        Adversary::Normal,
        Adversary::Hr,
        Adversary::Finance,
        Adversary::Client,
        Adversary::Involution,
    ];

    #[must_use]
    pub fn template(self) -> EnemyTemplate {
        match self {
            Adversary::Normal => {
                // The opening HR moves, without the finisher.
                let pool = hr_cards()
                    .into_iter()
                    .filter(|card| !card.is_finisher())
                    .take(5)
                    .collect();
                EnemyTemplate::new("Tech Director", 80, pool)
            }
            Adversary::Hr => EnemyTemplate::new("HR Matron", 120, hr_cards()),
            Adversary::Finance => EnemyTemplate::new("Iron Rooster of Finance", 150, finance_cards()),
            Adversary::Client => EnemyTemplate::new("Client Overlord", 200, client_cards()),
            Adversary::Involution => {
                EnemyTemplate::new("King of Involution", 300, involution_cards())
            }
        }
    }
}

impl FromStr for Adversary {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Adversary::Normal),
            "hr" => Ok(Adversary::Hr),
            "finance" => Ok(Adversary::Finance),
            "client" => Ok(Adversary::Client),
            "involution" => Ok(Adversary::Involution),
            _ => Err(CatalogError::Unknown(format!("adversary '{s}'"))),
        }
    }
}

fn hr_cards() -> Vec<Card> {
    vec![
        card(1002, "Performance Talk", Attack, 1).with_value(10),
        card(1003, "Forced Leave", Skill, 2).with_status(StatusKind::Stun, 1, Opponent),
        card(1004, "Values Review", Power, 2).with_status(StatusKind::TrueDmgOnPlay, 5, Own),
        card(1005, "Pay Cut Warning", Skill, 1).with_status(StatusKind::CostUp, 1, Opponent),
        card(1006, "Optimization Red Line", Attack, 2)
            .with_value(15)
            .with_op(EffectOp::Execute { below_percent: 30 }),
        card(1008, "Talent Pool", Skill, 1).with_op(EffectOp::StripShield),
        card(1009, "Attendance Fine", Attack, 1)
            .with_value(10)
            .with_op(EffectOp::StealCurrency(20)),
        card(1011, "Pie for Dinner", Skill, 1).with_heal(20),
        card(1012, "Labor Contract", Skill, 2).with_status(StatusKind::Weak, 2, Opponent),
        card(1014, "Smear Campaign", Attack, 2)
            .with_value(10)
            .with_status(StatusKind::Vulnerable, 3, Opponent),
        card(1015, "Final Persuasion", Attack, 3).with_value(40),
    ]
}

fn finance_cards() -> Vec<Card> {
    vec![
        card(1101, "Expense Rejected", Skill, 1).with_status(StatusKind::CounterHeal, 1, Own),
        card(1102, "Cost Accounting", Power, 2).with_status(StatusKind::Fortify, 10, Own),
        card(1103, "Funds Frozen", Skill, 2).with_op(EffectOp::DrainEnergy(2)),
        card(1104, "Bad Debt", Attack, 1)
            .with_value(8)
            .with_op(EffectOp::StealCurrency(20)),
        card(1105, "Tax Shelter", Skill, 1).with_status(StatusKind::Dodge, 2, Own),
        card(1106, "Budget Control", Power, 3).with_status(StatusKind::CardLimit, 3, Opponent),
        card(1107, "Depreciation", Attack, 1)
            .with_value(5)
            .with_op(EffectOp::HalveTargetShield),
        card(1108, "Audit", Attack, 2)
            .with_value(12)
            .with_op(EffectOp::Penetrating),
        card(1109, "Deferred Payment", Skill, 0).with_heal(20),
        card(1110, "Cash Crunch", Attack, 3).with_value(25),
        card(1111, "Tax Credit", Power, 2).with_value(20),
        card(1112, "Restructuring", Skill, 2).with_heal(30).with_value(10),
        card(1113, "Fixed Assets", Attack, 1).with_op(EffectOp::ScaleByShield {
            percent: 50,
            consume: false,
        }),
        card(1115, "Liquidation", Attack, 4)
            .with_value(50)
            .with_op(EffectOp::StealCurrency(100)),
    ]
}

fn client_cards() -> Vec<Card> {
    vec![
        card(1201, "Sudden Idea", Attack, 1)
            .with_value(10)
            .with_op(EffectOp::AddJunk),
        card(1202, "Not This One", Skill, 1).with_op(EffectOp::StripShield),
        card(1203, "Ship It ASAP", Attack, 0)
            .with_value(5)
            .with_op(EffectOp::ExtraAction),
        card(1205, "Missing Payment", Attack, 3).with_value(30),
        card(1206, "Want It All", Power, 3).with_value(20),
        card(1208, "Expert Panel", Skill, 1).with_status(StatusKind::Weak, 2, Opponent),
        card(1209, "Phone Barrage", Attack, 1)
            .with_value(3)
            .with_op(EffectOp::Repeat(5)),
        card(1210, "Logic Hole", Attack, 2).with_value(15),
        card(1211, "Benchmarking", Skill, 1).with_heal(20),
        card(1212, "Unreasonable", Attack, 2).with_value(20),
        card(1213, "Strategic Partner", Power, 2).with_status(StatusKind::Regen, 5, Own),
        card(1214, "Repositioning", Skill, 2).with_status(StatusKind::Vulnerable, 3, Opponent),
        card(1215, "Final Draft Hell", Attack, 5).with_value(80),
    ]
}

fn involution_cards() -> Vec<Card> {
    vec![
        card(1301, "Dimensional Strike", Attack, 2)
            .with_value(20)
            .with_op(EffectOp::Penetrating),
        card(1302, "3 AM", Power, 3).with_status(StatusKind::Involution, 5, Own),
        card(1303, "Forced Benchmark", Attack, 2).with_value(30),
        card(1304, "Iteration", Skill, 1).with_status(StatusKind::Strength, 5, Own),
        card(1305, "Full-stack Crush", Attack, 2)
            .with_value(15)
            .with_status(StatusKind::Weak, 2, Opponent),
        card(1306, "Monopoly", Power, 4).with_status(StatusKind::CardLimit, 3, Opponent),
        card(1307, "Resume Devourer", Attack, 2)
            .with_value(10)
            .with_op(EffectOp::StealCurrency(50)),
        card(1308, "Upward Channel", Skill, 1).with_op(EffectOp::StealBuffs),
        card(1309, "Financial Freedom", Attack, 3).with_value(40),
        card(1310, "996 Blessing", Power, 5)
            .with_heal(10)
            .with_status(StatusKind::Strength, 2, Own),
        card(1311, "Cost Down", Attack, 1)
            .with_value(30)
            .with_op(EffectOp::SelfDamage(10)),
        card(1312, "Architecture Lockdown", Skill, 1)
            .with_status(StatusKind::SilenceAttack, 2, Opponent),
        card(1313, "Awakening", Skill, 2).with_status(StatusKind::Vulnerable, 3, Opponent),
        card(1314, "Resource Black Hole", Skill, 2).with_op(EffectOp::DrainEnergy(1)),
        card(1315, "A Speck of Dust", Attack, 99).with_value(99),
    ]
}

/// Registry of every built-in card.
pub fn registry() -> Result<CardRegistry, CatalogError> {
    let shared = [basic_attack(), basic_defend(), junk_card(), curse_card()];
    let classes = PlayerClass::ALL.into_iter().flat_map(PlayerClass::cards);
    let adversaries = [hr_cards(), finance_cards(), client_cards(), involution_cards()]
        .into_iter()
        .flatten();
    CardRegistry::from_cards(shared.into_iter().chain(classes).chain(adversaries))
}
