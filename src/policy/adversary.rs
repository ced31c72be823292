//! Adversary move selection.
//!
//! Policies are trait-based so the battle can swap heuristics:
//! - `PriorityPolicy`: the four-rule priority list
//! - `UniformPolicy`: uniform random from the pool

use tracing::debug;

use crate::cards::{Card, CardKind};
use crate::core::{BattleConfig, BattleState, GameRng};

/// What a policy may look at when choosing the next move.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyContext {
    /// Kind of the player's most recent card.
    pub last_player_card: Option<CardKind>,
    pub player_shield: i64,
    pub player_health_fraction: f64,
    pub shield_threshold: i64,
    pub execute_fraction: f64,
    pub counter_heal_chance: f64,
}

impl PolicyContext {
    /// Observe the player's side of `state` with thresholds from `config`.
    #[must_use]
    pub fn observe(state: &BattleState, config: &BattleConfig) -> Self {
        Self {
            last_player_card: state.turn.last_player_card,
            player_shield: state.player.shield(),
            player_health_fraction: state.player.health_fraction(),
            shield_threshold: config.shield_threshold,
            execute_fraction: config.execute_fraction,
            counter_heal_chance: config.counter_heal_chance,
        }
    }
}

/// Chooses the adversary's next telegraphed move.
pub trait AdversaryPolicy: Send + Sync {
    /// Pick a move from `pool`.
    ///
    /// Returns `None` only for an empty pool.
    fn select_move(
        &self,
        pool: &[Card],
        ctx: &PolicyContext,
        rng: &mut GameRng,
    ) -> Option<Card>;
}

/// Priority-list heuristic. First matching rule wins:
///
/// 1. The player's last card was a Skill and the pool holds a counter-heal
///    move: pick it with probability `counter_heal_chance`.
/// 2. Player shield above `shield_threshold`: first piercing move.
/// 3. Player health fraction below `execute_fraction`: first finisher.
/// 4. Uniform random.
#[derive(Clone, Debug, Default)]
pub struct PriorityPolicy;

impl AdversaryPolicy for PriorityPolicy {
    fn select_move(
        &self,
        pool: &[Card],
        ctx: &PolicyContext,
        rng: &mut GameRng,
    ) -> Option<Card> {
        if pool.is_empty() {
            return None;
        }

        if ctx.last_player_card == Some(CardKind::Skill) {
            if let Some(card) = pool.iter().find(|card| card.is_counter_heal()) {
                if rng.gen_bool(ctx.counter_heal_chance) {
                    debug!(card = %card.name, "policy: counter-heal answer to a skill");
                    return Some(card.clone());
                }
            }
        }

        if ctx.player_shield > ctx.shield_threshold {
            if let Some(card) = pool.iter().find(|card| card.is_piercing()) {
                debug!(card = %card.name, shield = ctx.player_shield, "policy: pierce shield");
                return Some(card.clone());
            }
        }

        if ctx.player_health_fraction < ctx.execute_fraction {
            if let Some(card) = pool.iter().find(|card| card.is_finisher()) {
                debug!(
                    card = %card.name,
                    fraction = ctx.player_health_fraction,
                    "policy: go for the finish"
                );
                return Some(card.clone());
            }
        }

        UniformPolicy.select_move(pool, ctx, rng)
    }
}

/// Uniform random selection.
#[derive(Clone, Debug, Default)]
pub struct UniformPolicy;

impl AdversaryPolicy for UniformPolicy {
    fn select_move(
        &self,
        pool: &[Card],
        _ctx: &PolicyContext,
        rng: &mut GameRng,
    ) -> Option<Card> {
        let card = rng.choose(pool).cloned();
        if let Some(card) = &card {
            debug!(card = %card.name, "policy: random move");
        }
        card
    }
}
