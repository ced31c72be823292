//! Command-line battle runner.
//!
//! Auto-plays one battle with a greedy player: play the first card that can
//! be played, and end the turn when none can.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use factory_storm::cards::catalog::{Adversary, PlayerClass};
use factory_storm::{
    Battle, BattleConfig, CardResolver, Phase, ScriptedTaunts, Side, TauntBoard,
};

/// Plays are capped per turn so zero-cost draw loops cannot spin forever.
const MAX_PLAYS_PER_TURN: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "factory-storm")]
#[command(about = "Auto-play one office card battle")]
struct Cli {
    /// Player class (programmer, police, designer, doctor, civil, pm)
    #[arg(long, default_value = "programmer")]
    class: PlayerClass,

    /// Adversary (normal, hr, finance, client, involution)
    #[arg(long, default_value = "normal")]
    enemy: Adversary,

    /// RNG seed for determinism
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON battle config; defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause between enemy beats like a presentation layer would
    #[arg(long)]
    paced: bool,

    /// Stop after this many turns
    #[arg(long, default_value_t = 50)]
    max_turns: u32,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => BattleConfig::from_path(path)?,
        None => BattleConfig::default(),
    };
    let taunt_timeout = config.taunt_timeout();

    let mut battle = Battle::start(cli.class.profile(), &cli.enemy.template(), config, cli.seed)?;
    let mut board = Some(TauntBoard::spawn(
        Arc::new(ScriptedTaunts),
        battle.player_snapshot(),
        battle.state().enemy.name.clone(),
        taunt_timeout,
        battle.rng(),
    ));

    let mut printed = 0;
    while !battle.is_over() && battle.state().turn.number <= cli.max_turns {
        if let Some(line) = board.as_ref().and_then(TauntBoard::current) {
            battle.announce_taunt(line);
            board = None;
        }
        play_greedy(&mut battle)?;
        printed = print_new_lines(&battle, printed);
        if battle.is_over() {
            break;
        }

        if cli.paced {
            battle.run_enemy_phase_paced().await;
        } else {
            battle.run_enemy_phase();
        }
        printed = print_new_lines(&battle, printed);
    }

    if let Some(board) = board {
        battle.announce_taunt(board.settled().await);
        print_new_lines(&battle, printed);
    }

    match battle.phase() {
        Phase::BattleOver(outcome) => println!("Result: {outcome}"),
        _ => println!("Result: stopped after {} turns", cli.max_turns),
    }

    let profile = battle.into_profile();
    info!(health = profile.health, currency = profile.currency, "profile returned");
    println!(
        "{}: {}/{} health, {} coins",
        profile.name, profile.health, profile.max_health, profile.currency
    );
    Ok(())
}

/// Play the first playable card until none is left, then end the turn.
fn play_greedy(battle: &mut Battle) -> Result<()> {
    for _ in 0..MAX_PLAYS_PER_TURN {
        let playable = battle
            .hand()
            .iter()
            .position(|card| CardResolver::validate(card, Side::Player, battle.state()).is_ok());
        match playable {
            Some(index) => {
                if battle.play_card(index).is_err() || battle.is_over() {
                    break;
                }
            }
            None => break,
        }
    }
    if battle.phase() == Phase::PlayerTurn {
        battle.end_turn()?;
    }
    Ok(())
}

fn print_new_lines(battle: &Battle, printed: usize) -> usize {
    let lines = battle.log().lines();
    for line in &lines[printed..] {
        println!("{line}");
    }
    lines.len()
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
