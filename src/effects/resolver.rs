//! Card resolution: applying one card to the battle state.
//!
//! The same pipeline runs for the player and the adversary. A card resolves
//! in a fixed order of steps:
//!
//! 1. pay the effective cost
//! 2. heal redirected by the opponent's counter-heal stance, or
//! 3. heal, clamped to max
//! 4. on-play true damage from the opponent's stance (non-Attack cards)
//! 5. base value and value-transform ops (shield scaling, random rolls,
//!    shield strip/halve)
//! 6. damage modifiers: strength, conditional multipliers, weak, vulnerable
//! 7. shield for non-Attack value, plus bonus shield
//! 8. hits (dodge, plating, shield, thorns), then execute, then self-damage
//! 9. status payload and status ops
//! 10. draw, energy, pile ops, currency ops
//! 11. played card to discard
//! 12. terminal check
//!
//! Validation happens before step 1; a rejected card changes nothing.

use tracing::debug;

use crate::cards::catalog;
use crate::cards::{Card, Condition, EffectOp, StatusTarget};
use crate::core::{BattleState, Combatant, GameRng, Rejection, Side};
use crate::rules::BattleOutcome;
use crate::status::StatusKind;

use super::narration::Narration;

/// Outcome of resolving one card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Everything that happened, in order.
    pub events: Vec<Narration>,
    /// Set when either side reached 0 health.
    pub terminal: Option<BattleOutcome>,
    /// The adversary should act again immediately.
    pub extra_action: bool,
}

/// Resolves cards against battle state.
pub struct CardResolver;

impl CardResolver {
    /// Energy the actor must pay. Enemies never pay.
    #[must_use]
    pub fn effective_cost(card: &Card, actor: Side, state: &BattleState) -> i64 {
        match actor {
            Side::Player => card.cost + state.player.statuses.get(StatusKind::CostUp),
            Side::Enemy => 0,
        }
    }

    /// Check every precondition without mutating anything.
    pub fn validate(card: &Card, actor: Side, state: &BattleState) -> Result<(), Rejection> {
        if !card.is_playable() {
            return Err(Rejection::Unplayable(card.id));
        }

        let me = state.combatant(actor);
        if me.statuses.has(StatusKind::Stun) {
            return Err(Rejection::Stunned);
        }
        if card.is_attack() && me.statuses.has(StatusKind::SilenceAttack) {
            return Err(Rejection::Silenced);
        }

        let needed = Self::effective_cost(card, actor, state);
        if needed > me.energy() {
            return Err(Rejection::InsufficientEnergy {
                needed,
                available: me.energy(),
            });
        }

        let limit = me.statuses.get(StatusKind::CardLimit);
        if actor == Side::Player && limit > 0 && i64::from(state.turn.cards_played) >= limit {
            return Err(Rejection::PlayLimitReached { limit });
        }

        Ok(())
    }

    /// Validate, then resolve `card` for `actor`.
    pub fn resolve(
        card: &Card,
        actor: Side,
        state: &mut BattleState,
        rng: &mut GameRng,
    ) -> Result<Resolution, Rejection> {
        Self::validate(card, actor, state)?;
        Ok(Self::apply(card, actor, state, rng))
    }

    /// Resolve a card that already passed [`CardResolver::validate`].
    ///
    /// A player card must already sit in the in-play slot.
    pub fn apply(card: &Card, actor: Side, state: &mut BattleState, rng: &mut GameRng) -> Resolution {
        let mut events = vec![Narration::Played {
            actor,
            card: card.name.clone(),
        }];

        Self::pay(card, actor, state, &mut events);
        Self::heal(card, actor, state, &mut events);
        Self::play_penalty(card, actor, state, &mut events);
        let value = Self::base_value(card, actor, state, rng, &mut events);
        let value = Self::modify_damage(card, actor, state, value);
        Self::shield(card, actor, state, value, &mut events);
        Self::strike(card, actor, state, value, &mut events);
        Self::statuses(card, actor, state, rng, &mut events);
        Self::resources(card, actor, state, rng, &mut events);

        // Step 11
        if actor == Side::Player {
            state.piles.discard_played();
        }

        // Step 12
        let terminal = state.outcome();
        if let Some(outcome) = terminal {
            events.push(Narration::BattleEnded(outcome));
        }
        let extra_action = actor == Side::Enemy && card.grants_extra_action() && terminal.is_none();

        debug!(
            card = %card.name,
            ?actor,
            events = events.len(),
            ?terminal,
            "card resolved"
        );

        Resolution {
            events,
            terminal,
            extra_action,
        }
    }

    // =========================================================================
    // Steps
    // =========================================================================

    /// Step 1.
    fn pay(card: &Card, actor: Side, state: &mut BattleState, events: &mut Vec<Narration>) {
        let cost = Self::effective_cost(card, actor, state);
        if cost > 0 {
            state.combatant_mut(actor).spend_energy(cost);
            events.push(Narration::CostPaid {
                actor,
                amount: cost,
            });
        }
        if actor == Side::Player {
            state.turn.cards_played += 1;
            state.turn.last_player_card = Some(card.kind);
        }
    }

    /// Steps 2 and 3.
    fn heal(card: &Card, actor: Side, state: &mut BattleState, events: &mut Vec<Narration>) {
        let Some(amount) = card.heal.filter(|h| *h > 0) else {
            return;
        };
        let (me, opponent) = state.pair_mut(actor);
        if opponent.statuses.has(StatusKind::CounterHeal) {
            let lost = me.lose_health(amount);
            debug!(?actor, lost, "heal redirected");
            events.push(Narration::HealRedirected {
                side: actor,
                amount: lost,
            });
        } else {
            let healed = me.heal(amount);
            if healed > 0 {
                events.push(Narration::Healed {
                    side: actor,
                    amount: healed,
                });
            }
        }
    }

    /// Step 4.
    fn play_penalty(card: &Card, actor: Side, state: &mut BattleState, events: &mut Vec<Narration>) {
        if card.is_attack() {
            return;
        }
        let (me, opponent) = state.pair_mut(actor);
        let penalty = opponent.statuses.get(StatusKind::TrueDmgOnPlay);
        if penalty > 0 {
            let lost = me.lose_health(penalty);
            events.push(Narration::PlayPenalty {
                side: actor,
                amount: lost,
            });
        }
    }

    /// Step 5.
    fn base_value(
        card: &Card,
        actor: Side,
        state: &mut BattleState,
        rng: &mut GameRng,
        events: &mut Vec<Narration>,
    ) -> i64 {
        let target = actor.opponent();
        let mut value = card.value.unwrap_or(0);
        let (me, opponent) = state.pair_mut(actor);

        for op in &card.ops {
            match *op {
                EffectOp::ScaleByShield { percent, consume } => {
                    let shield = me.shield();
                    value = shield * percent / 100;
                    if consume && shield > 0 {
                        me.set_shield(0);
                        events.push(Narration::ShieldConsumed {
                            side: actor,
                            amount: shield,
                        });
                    }
                }
                EffectOp::RandomValue { min, max } => {
                    value = rng.gen_range_inclusive(min..=max);
                }
                EffectOp::StripShield => {
                    let stripped = opponent.shield();
                    opponent.set_shield(0);
                    events.push(Narration::ShieldStripped {
                        side: target,
                        amount: stripped,
                    });
                }
                EffectOp::HalveTargetShield => {
                    let remaining = opponent.shield() / 2;
                    opponent.set_shield(remaining);
                    events.push(Narration::ShieldHalved {
                        side: target,
                        remaining,
                    });
                }
                _ => {}
            }
        }
        value
    }

    /// Step 6. Non-Attack values pass through unchanged.
    fn modify_damage(card: &Card, actor: Side, state: &BattleState, value: i64) -> i64 {
        if !card.is_attack() {
            return value;
        }
        let me = state.combatant(actor);
        let opponent = state.combatant(actor.opponent());

        let mut damage = value + me.statuses.get(StatusKind::Strength);
        for op in &card.ops {
            if let EffectOp::ConditionalMultiplier { condition, percent } = *op {
                if condition_holds(condition, me, opponent) {
                    damage = damage * percent / 100;
                }
            }
        }
        if me.statuses.has(StatusKind::Weak) {
            damage = damage * 3 / 4;
        }
        if opponent.statuses.has(StatusKind::Vulnerable) {
            damage = damage * 3 / 2;
        }
        damage.max(0)
    }

    /// Step 7.
    fn shield(
        card: &Card,
        actor: Side,
        state: &mut BattleState,
        value: i64,
        events: &mut Vec<Narration>,
    ) {
        let bonus: i64 = card
            .ops
            .iter()
            .filter_map(|op| match op {
                EffectOp::BonusShield(n) => Some(*n),
                _ => None,
            })
            .sum();
        let amount = if card.is_attack() { bonus } else { value.max(0) + bonus };
        if amount > 0 {
            state.combatant_mut(actor).gain_shield(amount);
            events.push(Narration::ShieldGained {
                side: actor,
                amount,
            });
        }
    }

    /// Step 8.
    fn strike(
        card: &Card,
        actor: Side,
        state: &mut BattleState,
        damage: i64,
        events: &mut Vec<Narration>,
    ) {
        let target = actor.opponent();
        let (me, opponent) = state.pair_mut(actor);

        if card.is_attack() {
            let penetrating = card.has_op(&EffectOp::Penetrating);
            for _ in 0..card.hit_count() {
                if opponent.is_defeated() || me.is_defeated() {
                    break;
                }
                if opponent.statuses.take_one(StatusKind::Dodge) {
                    events.push(Narration::Dodged { side: target });
                    continue;
                }

                let hit = (damage - opponent.statuses.get(StatusKind::Plating)).max(0);
                let through = if penetrating { hit } else { opponent.absorb(hit) };
                let lost = opponent.lose_health(through);
                events.push(Narration::Damaged {
                    side: target,
                    amount: lost,
                    absorbed: hit - through,
                });

                let thorns = opponent.statuses.get(StatusKind::Thorns);
                if thorns > 0 {
                    let reflected = me.lose_health(thorns);
                    events.push(Narration::Reflected {
                        side: actor,
                        amount: reflected,
                    });
                }
            }
        }

        for op in &card.ops {
            match *op {
                EffectOp::Execute { below_percent }
                    if !opponent.is_defeated() && opponent.health_below_percent(below_percent) =>
                {
                    opponent.defeat();
                    events.push(Narration::Executed { side: target });
                }
                EffectOp::SelfDamage(n) => {
                    let lost = me.lose_health(n);
                    events.push(Narration::SelfDamage {
                        side: actor,
                        amount: lost,
                    });
                }
                _ => {}
            }
        }
    }

    /// Step 9.
    fn statuses(
        card: &Card,
        actor: Side,
        state: &mut BattleState,
        rng: &mut GameRng,
        events: &mut Vec<Narration>,
    ) {
        let target = actor.opponent();

        if let Some(payload) = card.status {
            let side = match payload.target {
                StatusTarget::Own => actor,
                StatusTarget::Opponent => target,
            };
            let total = state
                .combatant_mut(side)
                .statuses
                .apply(payload.kind, payload.magnitude);
            events.push(Narration::StatusApplied {
                side,
                kind: payload.kind,
                delta: payload.magnitude,
                total,
            });
        }

        let (me, opponent) = state.pair_mut(actor);
        for op in &card.ops {
            match *op {
                EffectOp::DrainEnergy(n) => {
                    let total = opponent.statuses.apply(StatusKind::EnergyDrain, n);
                    events.push(Narration::StatusApplied {
                        side: target,
                        kind: StatusKind::EnergyDrain,
                        delta: n,
                        total,
                    });
                }
                EffectOp::DoublePoison => {
                    let poison = opponent.statuses.get(StatusKind::Poison);
                    if poison > 0 {
                        let total = opponent.statuses.apply(StatusKind::Poison, poison);
                        events.push(Narration::StatusApplied {
                            side: target,
                            kind: StatusKind::Poison,
                            delta: poison,
                            total,
                        });
                    }
                }
                EffectOp::Cleanse => {
                    let debuffs = me.statuses.debuffs();
                    if let Some(&kind) = rng.choose(&debuffs) {
                        me.statuses.remove(kind);
                        events.push(Narration::StatusRemoved {
                            side: actor,
                            kinds: vec![kind],
                        });
                    }
                }
                EffectOp::CleanseAll => {
                    let debuffs = me.statuses.debuffs();
                    for &kind in &debuffs {
                        me.statuses.remove(kind);
                    }
                    if !debuffs.is_empty() {
                        events.push(Narration::StatusRemoved {
                            side: actor,
                            kinds: debuffs,
                        });
                    }
                }
                EffectOp::StealBuffs => {
                    let buffs = opponent.statuses.buffs();
                    for &kind in &buffs {
                        let magnitude = opponent.statuses.remove(kind);
                        me.statuses.apply(kind, magnitude);
                    }
                    if !buffs.is_empty() {
                        events.push(Narration::BuffsStolen {
                            from: target,
                            kinds: buffs,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    /// Step 10. Pile ops only ever touch the player's piles.
    fn resources(
        card: &Card,
        actor: Side,
        state: &mut BattleState,
        rng: &mut GameRng,
        events: &mut Vec<Narration>,
    ) {
        let target = actor.opponent();

        if let Some(n) = card.draw.filter(|n| *n > 0) {
            if actor == Side::Player {
                let count = state.draw_for_player(n as usize, rng);
                events.push(Narration::Drew { count });
            }
        }

        if let Some(n) = card.energy_gain {
            let gained = state.combatant_mut(actor).gain_energy(n);
            if gained > 0 {
                events.push(Narration::EnergyGained {
                    side: actor,
                    amount: gained,
                });
            }
        }

        for op in &card.ops {
            match *op {
                EffectOp::DuplicateCard if actor == Side::Player => {
                    state.piles.shuffle_into_draw(card.clone(), rng);
                    events.push(Narration::CardShuffledIn {
                        side: actor,
                        card: card.name.clone(),
                    });
                }
                EffectOp::AddJunk if target == Side::Player => {
                    let junk = catalog::junk_card();
                    events.push(Narration::CardShuffledIn {
                        side: target,
                        card: junk.name.clone(),
                    });
                    state.piles.shuffle_into_draw(junk, rng);
                }
                EffectOp::DiscardRandom(n) if actor == Side::Player => {
                    let count = state.piles.discard_random(n as usize, rng).len();
                    if count > 0 {
                        events.push(Narration::Discarded { count });
                    }
                }
                EffectOp::Wheel(n) if actor == Side::Player => {
                    let count = state.piles.discard_hand();
                    events.push(Narration::Discarded { count });
                    let count = state.draw_for_player(n as usize, rng);
                    events.push(Narration::Drew { count });
                }
                EffectOp::StealCurrency(n) => {
                    let (me, opponent) = state.pair_mut(actor);
                    let taken = -opponent.adjust_currency(-n);
                    me.adjust_currency(taken);
                    if taken > 0 {
                        events.push(Narration::CurrencyChanged {
                            side: target,
                            amount: -taken,
                        });
                    }
                }
                EffectOp::GainCurrency(n) => {
                    let gained = state.combatant_mut(actor).adjust_currency(n);
                    if gained > 0 {
                        events.push(Narration::CurrencyChanged {
                            side: actor,
                            amount: gained,
                        });
                    }
                }
                _ => {}
            }
        }
    }
}

fn condition_holds(condition: Condition, me: &Combatant, opponent: &Combatant) -> bool {
    match condition {
        Condition::TargetHasDebuff => opponent.statuses.has_debuff(),
        Condition::ActorHealthBelow(percent) => me.health_below_percent(percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{Adversary, PlayerClass};
    use crate::cards::{CardId, CardKind};
    use crate::zones::Piles;

    fn state() -> BattleState {
        BattleState::new(
            Combatant::player(&PlayerClass::Pm.profile()),
            Combatant::enemy(&Adversary::Hr.template()),
            Piles::default(),
        )
    }

    fn attack(value: i64) -> Card {
        Card::new(CardId::new(900), "Test Hit", CardKind::Attack, 1).with_value(value)
    }

    #[test]
    fn test_effective_cost() {
        let mut state = state();
        let card = attack(5);
        assert_eq!(CardResolver::effective_cost(&card, Side::Player, &state), 1);
        state.player.statuses.apply(StatusKind::CostUp, 1);
        assert_eq!(CardResolver::effective_cost(&card, Side::Player, &state), 2);
        assert_eq!(CardResolver::effective_cost(&card, Side::Enemy, &state), 0);
    }

    #[test]
    fn test_validation_order() {
        let mut state = state();
        state.player.statuses.apply(StatusKind::Stun, 1);
        let junk = catalog::junk_card();
        assert_eq!(
            CardResolver::validate(&junk, Side::Player, &state),
            Err(Rejection::Unplayable(junk.id))
        );
        assert_eq!(
            CardResolver::validate(&attack(1), Side::Player, &state),
            Err(Rejection::Stunned)
        );
    }

    #[test]
    fn test_silence_blocks_attacks_only() {
        let mut state = state();
        state.player.statuses.apply(StatusKind::SilenceAttack, 1);
        assert_eq!(
            CardResolver::validate(&attack(1), Side::Player, &state),
            Err(Rejection::Silenced)
        );
        let guard = Card::new(CardId::new(901), "Guard", CardKind::Skill, 1).with_value(5);
        assert!(CardResolver::validate(&guard, Side::Player, &state).is_ok());
    }

    #[test]
    fn test_play_limit() {
        let mut state = state();
        state.player.statuses.apply(StatusKind::CardLimit, 3);
        state.turn.cards_played = 3;
        assert_eq!(
            CardResolver::validate(&attack(1), Side::Player, &state),
            Err(Rejection::PlayLimitReached { limit: 3 })
        );
    }

    #[test]
    fn test_strength_weak_vulnerable_order() {
        let mut state = state();
        let mut rng = GameRng::new(0);
        state.player.statuses.apply(StatusKind::Strength, 2);
        state.player.statuses.apply(StatusKind::Weak, 1);
        state.enemy.statuses.apply(StatusKind::Vulnerable, 1);

        // (10 + 2) * 3/4 = 9, then * 3/2 = 13
        CardResolver::resolve(&attack(10), Side::Player, &mut state, &mut rng).unwrap();
        assert_eq!(state.enemy.health(), 120 - 13);
    }

    #[test]
    fn test_dodge_negates_one_hit() {
        let mut state = state();
        let mut rng = GameRng::new(0);
        state.enemy.statuses.apply(StatusKind::Dodge, 1);
        let double = attack(5).with_op(EffectOp::Repeat(1));

        let resolution = CardResolver::resolve(&double, Side::Player, &mut state, &mut rng).unwrap();
        assert_eq!(state.enemy.health(), 115);
        assert!(!state.enemy.statuses.has(StatusKind::Dodge));
        assert!(resolution
            .events
            .contains(&Narration::Dodged { side: Side::Enemy }));
    }

    #[test]
    fn test_thorns_reflect_per_hit() {
        let mut state = state();
        let mut rng = GameRng::new(0);
        state.enemy.statuses.apply(StatusKind::Thorns, 2);
        let triple = attack(3).with_op(EffectOp::Repeat(2));

        CardResolver::resolve(&triple, Side::Player, &mut state, &mut rng).unwrap();
        assert_eq!(state.enemy.health(), 111);
        assert_eq!(state.player.health(), 75 - 6);
    }

    #[test]
    fn test_extra_action_only_for_enemy() {
        let mut state = state();
        let mut rng = GameRng::new(0);
        let rush = attack(5).with_op(EffectOp::ExtraAction);
        let resolution = CardResolver::resolve(&rush, Side::Enemy, &mut state, &mut rng).unwrap();
        assert!(resolution.extra_action);
        let resolution = CardResolver::resolve(&rush, Side::Player, &mut state, &mut rng).unwrap();
        assert!(!resolution.extra_action);
    }
}
