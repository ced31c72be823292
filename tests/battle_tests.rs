//! Turn state machine tests.
//!
//! These tests drive whole turns through `Battle`:
//! - phase transitions and rejections outside the player's turn
//! - start and end of turn passives
//! - enemy stun, extra actions, intent selection
//! - win/loss detection, determinism and snapshots

use factory_storm::cards::catalog::{self, Adversary, EnemyTemplate, PlayerClass};
use factory_storm::cards::{Card, CardId, CardKind, EffectOp, StatusTarget};
use factory_storm::core::{Action, BattleConfig, BattleState, Rejection, Side};
use factory_storm::rules::{Battle, BattleOutcome, Phase};
use factory_storm::status::StatusKind;
use factory_storm::zones::Piles;

fn start(class: PlayerClass, enemy: &EnemyTemplate, seed: u64) -> Battle {
    Battle::start(class.profile(), enemy, BattleConfig::default(), seed).unwrap()
}

fn set_hand(battle: &mut Battle, hand: Vec<Card>) {
    battle.state_mut().piles = Piles::from_parts(Vec::new(), hand, Vec::new());
}

fn strike(value: i64) -> Card {
    Card::new(CardId::new(900), "Strike", CardKind::Attack, 1).with_value(value)
}

/// A pool of one harmless move keeps the player's numbers predictable.
fn idle_enemy(health: i64) -> EnemyTemplate {
    EnemyTemplate::new(
        "Idle",
        health,
        vec![Card::new(CardId::new(901), "Stare", CardKind::Skill, 0)],
    )
}

/// Greedy autoplay for whole-battle tests.
fn autoplay(battle: &mut Battle, max_turns: u32) {
    while !battle.is_over() && battle.state().turn.number <= max_turns {
        for _ in 0..30 {
            let playable = battle.hand().iter().position(|card| {
                factory_storm::effects::CardResolver::validate(card, Side::Player, battle.state())
                    .is_ok()
            });
            match playable {
                Some(i) if battle.play_card(i).is_ok() && !battle.is_over() => {}
                _ => break,
            }
        }
        if battle.is_over() {
            break;
        }
        battle.end_turn().unwrap();
        battle.run_enemy_phase();
    }
}

/// Counter-heal on the enemy turns a player heal into damage, in the log too.
#[test]
fn test_counter_heal_redirect_narrated() {
    let mut battle = start(PlayerClass::Doctor, &idle_enemy(50), 1);
    battle.state_mut().player.lose_health(20);
    battle
        .state_mut()
        .enemy
        .statuses
        .apply(StatusKind::CounterHeal, 1);
    let heal = Card::new(CardId::new(902), "Patch Up", CardKind::Skill, 1).with_heal(5);
    set_hand(&mut battle, vec![heal]);
    let before = battle.state().player.health();

    battle.play_card(0).unwrap();

    assert_eq!(battle.state().player.health(), before - 5);
    assert!(battle.log().contains("Heal rejected"));
    assert!(!battle.log().contains("heals 5"));
}

/// A stunned player cannot play, and the rejection is narrated.
#[test]
fn test_stunned_player_rejected() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(50), 2);
    battle.state_mut().player.statuses.apply(StatusKind::Stun, 1);
    set_hand(&mut battle, vec![strike(5)]);
    let before = battle.state().clone();

    assert_eq!(battle.play_card(0), Err(Rejection::Stunned));
    assert_eq!(battle.state(), &before);
    assert!(battle.log().contains("Cannot play"));

    // Stun wears off at the end of the player's turn.
    battle.end_turn().unwrap();
    assert!(!battle.state().player.statuses.has(StatusKind::Stun));
}

/// The per-turn play limit counts accepted plays only.
#[test]
fn test_play_limit() {
    let mut battle = start(PlayerClass::Designer, &idle_enemy(200), 3);
    battle
        .state_mut()
        .player
        .statuses
        .apply(StatusKind::CardLimit, 1);
    set_hand(&mut battle, vec![strike(1), strike(1)]);

    battle.play_card(0).unwrap();
    assert_eq!(
        battle.play_card(0),
        Err(Rejection::PlayLimitReached { limit: 1 })
    );
}

/// Budget Control cast twice still allows three plays, not six.
#[test]
fn test_repeated_play_limit_does_not_loosen() {
    let budget = catalog::registry()
        .unwrap()
        .get(CardId::new(1106))
        .cloned()
        .unwrap();
    let enemy = EnemyTemplate::new("Controller", 200, vec![budget]);
    let mut battle = start(PlayerClass::Pm, &enemy, 8);

    for _ in 0..2 {
        battle.end_turn().unwrap();
        assert_eq!(battle.run_enemy_phase(), Phase::PlayerTurn);
    }
    assert_eq!(battle.state().player.statuses.get(StatusKind::CardLimit), 3);

    let memo = Card::new(CardId::new(904), "Memo", CardKind::Skill, 0);
    set_hand(&mut battle, vec![memo; 6]);

    let accepted = (0..6).filter(|_| battle.play_card(0).is_ok()).count();
    assert_eq!(accepted, 3);
    assert_eq!(
        battle.play_card(0),
        Err(Rejection::PlayLimitReached { limit: 3 })
    );
}

/// A skill from an earlier turn no longer arms the counter-heal answer.
#[test]
fn test_idle_turn_clears_last_card() {
    let reject = Card::new(CardId::new(905), "Reject Expense", CardKind::Power, 0).with_status(
        StatusKind::CounterHeal,
        1,
        StatusTarget::Own,
    );
    let enemy = EnemyTemplate::new(
        "Auditor",
        200,
        vec![reject, Card::new(CardId::new(901), "Stare", CardKind::Skill, 0)],
    );
    let config = BattleConfig::default().with_counter_heal_chance(1.0);
    let mut battle = Battle::start(PlayerClass::Doctor.profile(), &enemy, config, 9).unwrap();

    set_hand(
        &mut battle,
        vec![Card::new(CardId::new(906), "Memo", CardKind::Skill, 0)],
    );
    battle.play_card(0).unwrap();
    battle.end_turn().unwrap();
    battle.run_enemy_phase();

    assert!(battle.intent().unwrap().is_counter_heal());
    assert_eq!(battle.state().turn.number, 2);
    assert_eq!(battle.state().turn.last_player_card, None);

    let mut intents = Vec::new();
    for _ in 0..12 {
        battle.end_turn().unwrap();
        assert_eq!(battle.run_enemy_phase(), Phase::PlayerTurn);
        intents.push(battle.intent().unwrap().is_counter_heal());
    }
    assert!(intents.contains(&false));
}

/// A stunned enemy loses its move and keeps the same intent.
#[test]
fn test_stunned_enemy_skips() {
    let mut battle = start(PlayerClass::Police, &Adversary::Hr.template(), 4);
    battle.state_mut().enemy.statuses.apply(StatusKind::Stun, 1);
    let intent = battle.intent().cloned();
    let health = battle.state().player.health();

    battle.end_turn().unwrap();
    assert_eq!(battle.run_enemy_phase(), Phase::PlayerTurn);

    assert_eq!(battle.intent().cloned(), intent);
    assert_eq!(battle.state().player.health(), health);
    assert!(battle.log().contains("stunned"));
    assert!(!battle.state().enemy.statuses.has(StatusKind::Stun));
    assert!(battle
        .state()
        .history()
        .iter()
        .any(|r| r.side == Side::Enemy && r.action == Action::Skip));
}

/// An extra-action move acts twice in one enemy turn, never more.
#[test]
fn test_extra_action_once() {
    let rush = Card::new(CardId::new(903), "Rush", CardKind::Attack, 0)
        .with_value(5)
        .with_op(EffectOp::ExtraAction);
    let enemy = EnemyTemplate::new("Rusher", 50, vec![rush]);
    let mut battle = start(PlayerClass::Police, &enemy, 5);
    let health = battle.state().player.health();

    battle.end_turn().unwrap();
    battle.run_enemy_phase();

    assert_eq!(battle.state().player.health(), health - 10);
    assert!(battle.log().contains("acts again"));
    assert!(battle.intent().is_some());
}

/// Poison and overtime hit at the end of the player's turn.
#[test]
fn test_player_end_of_turn_damage() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(50), 6);
    battle.state_mut().player.statuses.apply(StatusKind::Poison, 3);
    battle.state_mut().player.statuses.apply(StatusKind::Overtime, 1);
    let health = battle.state().player.health();

    battle.end_turn().unwrap();

    assert_eq!(battle.state().player.health(), health - 3 - 5);
    assert_eq!(battle.state().player.statuses.get(StatusKind::Poison), 2);
    assert!(!battle.state().player.statuses.has(StatusKind::Overtime));
}

/// Regen heals at the end of the owner's turn.
#[test]
fn test_regen() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(50), 7);
    battle.state_mut().player.lose_health(30);
    battle.state_mut().player.statuses.apply(StatusKind::Regen, 4);
    let health = battle.state().player.health();

    battle.end_turn().unwrap();

    assert_eq!(battle.state().player.health(), health + 4);
}

/// Energy drain lowers the next refill once, then is gone.
#[test]
fn test_energy_drain_on_refill() {
    let mut battle = start(PlayerClass::Designer, &idle_enemy(50), 8);
    battle
        .state_mut()
        .player
        .statuses
        .apply(StatusKind::EnergyDrain, 2);

    battle.end_turn().unwrap();
    battle.run_enemy_phase();

    let player = &battle.state().player;
    assert_eq!(player.energy(), player.max_energy() - 2);
    assert!(!player.statuses.has(StatusKind::EnergyDrain));
}

/// Fortify shields and involution hurts both sides at the holder's turn start.
#[test]
fn test_enemy_turn_start_passives() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(100), 9);
    battle.state_mut().enemy.statuses.apply(StatusKind::Fortify, 10);
    battle
        .state_mut()
        .enemy
        .statuses
        .apply(StatusKind::Involution, 5);
    let player_health = battle.state().player.health();

    battle.end_turn().unwrap();
    assert_eq!(battle.advance(), Phase::EnemyTurn);

    assert_eq!(battle.state().enemy.shield(), 10);
    assert_eq!(battle.state().enemy.health(), 95);
    assert_eq!(battle.state().player.health(), player_health - 5);
}

/// The next turn refills energy, draws two and resets the counters.
#[test]
fn test_next_turn_setup() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(100), 10);
    battle.play_card(0).ok();
    battle.end_turn().unwrap();
    battle.run_enemy_phase();

    let state = battle.state();
    assert_eq!(state.turn.number, 2);
    assert_eq!(state.turn.cards_played, 0);
    assert_eq!(state.piles.hand().len(), 2);
    assert_eq!(state.player.energy(), state.player.max_energy());
    assert!(state.piles.is_consistent());
}

/// Killing the enemy ends the battle at once; further actions are refused.
#[test]
fn test_win_short_circuits() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(30), 11);
    battle.state_mut().enemy.lose_health(25);
    set_hand(&mut battle, vec![strike(10), strike(10)]);

    battle.play_card(0).unwrap();

    assert_eq!(battle.phase(), Phase::BattleOver(BattleOutcome::Win));
    assert_eq!(battle.play_card(0), Err(Rejection::BattleOver));
    assert_eq!(battle.end_turn(), Err(Rejection::BattleOver));
    assert_eq!(battle.advance(), Phase::BattleOver(BattleOutcome::Win));
    assert!(battle.log().contains("Victory"));
}

/// Dying to poison at the end of the turn is a loss before the enemy acts.
#[test]
fn test_loss_at_end_of_turn() {
    let mut battle = start(PlayerClass::Police, &idle_enemy(30), 12);
    let health = battle.state().player.health();
    battle.state_mut().player.lose_health(health - 2);
    battle.state_mut().player.statuses.apply(StatusKind::Poison, 5);

    assert_eq!(
        battle.end_turn(),
        Ok(Phase::BattleOver(BattleOutcome::Loss))
    );
    assert!(battle.log().contains("Defeat"));
}

/// The profile comes back with post-battle health and currency.
#[test]
fn test_into_profile() {
    let mut profile = PlayerClass::Pm.profile();
    profile.currency = 40;
    let deck_size = profile.deck.len();
    let mut battle =
        Battle::start(profile, &idle_enemy(30), BattleConfig::default(), 13).unwrap();
    battle.state_mut().player.lose_health(7);
    battle.state_mut().player.adjust_currency(-15);

    let profile = battle.into_profile();

    assert_eq!(profile.health, profile.max_health - 7);
    assert_eq!(profile.currency, 25);
    assert_eq!(profile.deck.len(), deck_size);
}

/// Same seed, same battle.
#[test]
fn test_deterministic_replay() {
    let run = |seed| {
        let mut battle = start(PlayerClass::Programmer, &Adversary::Client.template(), seed);
        autoplay(&mut battle, 15);
        (battle.log().lines().to_vec(), battle.phase())
    };
    assert_eq!(run(77), run(77));
}

/// Every class finishes a battle against the basic adversary with the pile
/// invariant intact.
#[test]
fn test_every_class_autoplays() {
    for class in PlayerClass::ALL {
        let mut battle = start(class, &Adversary::Normal.template(), 21);
        autoplay(&mut battle, 40);
        let state = battle.state();
        assert!(state.piles.is_consistent(), "{class:?}");
        assert!(state.player.health() >= 0);
        assert!(state.enemy.health() >= 0);
        assert!(state.player.energy() <= state.player.max_energy());
    }
}

/// Snapshots restore the exact state.
#[test]
fn test_snapshot_restore() {
    let mut battle = start(PlayerClass::Civil, &Adversary::Finance.template(), 14);
    autoplay(&mut battle, 3);

    let bytes = battle.snapshot().unwrap();
    let restored = BattleState::restore(&bytes).unwrap();

    assert_eq!(&restored, battle.state());
}

/// Only a window of the log is shown.
#[test]
fn test_recent_log_window() {
    let mut battle = start(PlayerClass::Police, &Adversary::Hr.template(), 15);
    autoplay(&mut battle, 3);

    assert!(battle.log().len() > 6);
    assert_eq!(battle.recent_log().len(), 6);
    assert_eq!(battle.recent_log().last(), battle.log().lines().last());
}

/// The paced enemy phase ends in the same place as the instant one.
#[tokio::test]
async fn test_paced_enemy_phase() {
    let config = BattleConfig::default().with_enemy_delay_ms(1);
    let enemy = Adversary::Hr.template();
    let mut paced = Battle::start(PlayerClass::Police.profile(), &enemy, config.clone(), 16).unwrap();
    let mut instant = Battle::start(PlayerClass::Police.profile(), &enemy, config, 16).unwrap();

    paced.end_turn().unwrap();
    instant.end_turn().unwrap();

    assert_eq!(paced.run_enemy_phase_paced().await, instant.run_enemy_phase());
    assert_eq!(paced.log().lines(), instant.log().lines());
}
