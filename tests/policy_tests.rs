//! Adversary policy tests.
//!
//! These tests verify the priority list against the shipped move pools:
//! - rule order (pierce before finish)
//! - finishers against a weakened player
//! - determinism under a fixed seed

use factory_storm::cards::catalog::{Adversary, EnemyTemplate, PlayerClass};
use factory_storm::cards::{Card, CardId, CardKind, EffectOp};
use factory_storm::core::{BattleConfig, BattleState, Combatant, GameRng};
use factory_storm::policy::{AdversaryPolicy, PolicyContext, PriorityPolicy, UniformPolicy};
use factory_storm::zones::Piles;

fn observe(player: Combatant, last: Option<CardKind>) -> PolicyContext {
    let enemy = Combatant::enemy(&Adversary::Hr.template());
    let mut state = BattleState::new(player, enemy, Piles::default());
    state.turn.last_player_card = last;
    PolicyContext::observe(&state, &BattleConfig::default())
}

/// A player at a quarter of their health draws the finisher.
#[test]
fn test_finisher_against_low_health() {
    let profile = PlayerClass::Police.profile();
    let player = Combatant::player(&profile).with_health(profile.max_health / 4);
    let ctx = observe(player, Some(CardKind::Attack));
    let pool = Adversary::Hr.template().move_pool;
    let mut rng = GameRng::new(42);

    for _ in 0..10 {
        let card = PriorityPolicy.select_move(&pool, &ctx, &mut rng).unwrap();
        assert!(card.is_finisher(), "picked {}", card.name);
    }
}

/// At exactly the execute fraction the finisher rule stays quiet.
#[test]
fn test_no_finisher_at_threshold() {
    let finisher = Card::new(CardId::new(1), "Finisher", CardKind::Attack, 1)
        .with_op(EffectOp::Execute { below_percent: 30 });
    let plain = Card::new(CardId::new(2), "Plain", CardKind::Attack, 1).with_value(5);
    let pool = vec![finisher, plain];

    let ctx = PolicyContext {
        player_health_fraction: 0.30,
        ..observe(Combatant::player(&PlayerClass::Pm.profile()), None)
    };
    let mut rng = GameRng::new(2);
    let plain_picks = (0..40)
        .filter(|_| !PriorityPolicy.select_move(&pool, &ctx, &mut rng).unwrap().is_finisher())
        .count();
    assert!(plain_picks > 0);
}

/// Shield above the threshold wins over low health.
#[test]
fn test_pierce_beats_finish() {
    let profile = PlayerClass::Police.profile();
    let player = Combatant::player(&profile)
        .with_health(10)
        .with_shield(20);
    let ctx = observe(player, None);
    let pool = Adversary::Hr.template().move_pool;
    let mut rng = GameRng::new(1);

    let card = PriorityPolicy.select_move(&pool, &ctx, &mut rng).unwrap();
    assert!(card.is_piercing());
    assert!(!card.is_finisher());
}

/// Without a matching move the rule falls through to random.
#[test]
fn test_rules_fall_through() {
    let template = EnemyTemplate::new(
        "Dummy",
        50,
        vec![Card::new(CardId::new(1), "Poke", CardKind::Attack, 1).with_value(1)],
    );
    let player = Combatant::player(&PlayerClass::Pm.profile())
        .with_health(1)
        .with_shield(99);
    let ctx = observe(player, Some(CardKind::Skill));
    let mut rng = GameRng::new(1);

    let card = PriorityPolicy
        .select_move(&template.move_pool, &ctx, &mut rng)
        .unwrap();
    assert_eq!(card.id, CardId::new(1));
}

/// Same seed, same choices.
#[test]
fn test_deterministic_under_seed() {
    let pool = Adversary::Involution.template().move_pool;
    let ctx = observe(Combatant::player(&PlayerClass::Doctor.profile()), None);

    let picks = |seed| {
        let mut rng = GameRng::new(seed);
        (0..20)
            .map(|_| UniformPolicy.select_move(&pool, &ctx, &mut rng).unwrap().id)
            .collect::<Vec<_>>()
    };
    assert_eq!(picks(9), picks(9));
}
