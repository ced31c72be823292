//! The battle turn machine.
//!
//! ## Example
//!
//! ```
//! use factory_storm::cards::catalog::{Adversary, PlayerClass};
//! use factory_storm::core::BattleConfig;
//! use factory_storm::rules::{Battle, Phase};
//!
//! let mut battle = Battle::start(
//!     PlayerClass::Police.profile(),
//!     &Adversary::Normal.template(),
//!     BattleConfig::default(),
//!     42,
//! )
//! .unwrap();
//!
//! assert_eq!(battle.phase(), Phase::PlayerTurn);
//! assert_eq!(battle.state().piles.hand().len(), 4);
//! assert!(battle.intent().is_some());
//!
//! battle.end_turn().unwrap();
//! let phase = battle.run_enemy_phase();
//! assert!(phase == Phase::PlayerTurn || phase.is_over());
//! ```

use tracing::{debug, info};

use crate::cards::catalog::EnemyTemplate;
use crate::cards::Card;
use crate::core::{
    Action, BattleConfig, BattleState, Combatant, ConfigError, GameRng, PlayerProfile, Rejection,
    Side, SnapshotError,
};
use crate::effects::{BattleLog, CardResolver, Narration, Resolution};
use crate::policy::{AdversaryPolicy, PolicyContext, PriorityPolicy};
use crate::status::{Decay, StatusKind};
use crate::taunt::PlayerSnapshot;
use crate::zones::Piles;

use super::phase::{BattleOutcome, Phase};

/// One fight between the player and an adversary.
pub struct Battle {
    state: BattleState,
    config: BattleConfig,
    policy: Box<dyn AdversaryPolicy>,
    rng: GameRng,
    log: BattleLog,
    phase: Phase,
    profile: PlayerProfile,
}

impl Battle {
    /// Start a battle with the priority-list adversary.
    pub fn start(
        profile: PlayerProfile,
        enemy: &EnemyTemplate,
        config: BattleConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::start_with_policy(profile, enemy, config, seed, Box::new(PriorityPolicy))
    }

    /// Start a battle with a custom adversary policy.
    ///
    /// Shuffles the deck, selects the first intent and draws the opening
    /// hand. The battle opens in [`Phase::PlayerTurn`].
    pub fn start_with_policy(
        profile: PlayerProfile,
        enemy: &EnemyTemplate,
        config: BattleConfig,
        seed: u64,
        policy: Box<dyn AdversaryPolicy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let player = Combatant::player(&profile);
        let piles = Piles::from_deck(player.deck(), &mut rng);
        let state = BattleState::new(player, Combatant::enemy(enemy), piles);

        let mut battle = Self {
            state,
            config,
            policy,
            rng,
            log: BattleLog::new(),
            phase: Phase::PlayerTurn,
            profile,
        };

        let mut events = vec![Narration::BattleStarted {
            enemy: enemy.name.clone(),
        }];
        battle.select_intent(&mut events);
        events.push(Narration::TurnStarted { number: 1 });
        let count = battle
            .state
            .draw_for_player(battle.config.opening_hand as usize, &mut battle.rng);
        events.push(Narration::Drew { count });
        battle.narrate(&events);

        info!(
            player = %battle.state.player.name,
            enemy = %battle.state.enemy.name,
            seed,
            "battle started"
        );
        Ok(battle)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Mutable state, for setting up positions.
    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Post the adversary's taunt to the narration log.
    pub fn announce_taunt(&mut self, line: impl Into<String>) {
        self.narrate(&[Narration::Taunt(line.into())]);
    }

    /// The log lines a presentation layer shows.
    #[must_use]
    pub fn recent_log(&self) -> &[String] {
        self.log.recent(self.config.log_window)
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// The adversary's telegraphed move.
    #[must_use]
    pub fn intent(&self) -> Option<&Card> {
        self.state.enemy.pending_move()
    }

    #[must_use]
    pub fn hand(&self) -> Vec<Card> {
        self.state.piles.hand().iter().cloned().collect()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Copy of the player's visible condition, for the taunt collaborator.
    #[must_use]
    pub fn player_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::of(&self.profile, &self.state.player)
    }

    /// Encode the battle state.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        self.state.snapshot()
    }

    /// Hand the persistent profile back with post-battle health and currency.
    #[must_use]
    pub fn into_profile(self) -> PlayerProfile {
        PlayerProfile {
            health: self.state.player.health(),
            currency: self.state.player.currency(),
            ..self.profile
        }
    }

    // =========================================================================
    // Player actions
    // =========================================================================

    /// Play the card at `hand_index`.
    ///
    /// On rejection nothing changes except one narration line.
    pub fn play_card(&mut self, hand_index: usize) -> Result<Resolution, Rejection> {
        let card = match self.check_player_turn().and_then(|()| {
            self.state
                .piles
                .hand()
                .get(hand_index)
                .cloned()
                .ok_or(Rejection::NoSuchCard(hand_index))
        }) {
            Ok(card) => card,
            Err(rejection) => return Err(self.reject(rejection)),
        };

        if let Err(rejection) = CardResolver::validate(&card, Side::Player, &self.state) {
            return Err(self.reject(rejection));
        }
        if self.state.piles.take_from_hand(hand_index).is_none() {
            return Err(self.reject(Rejection::NoSuchCard(hand_index)));
        }

        self.state.record(Side::Player, Action::Play(card.id));
        let resolution = CardResolver::apply(&card, Side::Player, &mut self.state, &mut self.rng);
        self.narrate(&resolution.events);
        if let Some(outcome) = resolution.terminal {
            self.finish(outcome);
        }
        Ok(resolution)
    }

    /// End the player's turn: end-of-turn passives, then sweep the hand.
    pub fn end_turn(&mut self) -> Result<Phase, Rejection> {
        if let Err(rejection) = self.check_player_turn() {
            return Err(self.reject(rejection));
        }

        self.state.record(Side::Player, Action::EndTurn);
        let mut events = self.end_of_turn(Side::Player);
        let swept = self.state.piles.sweep_hand();
        if swept > 0 {
            events.push(Narration::Discarded { count: swept });
        }

        if !self.settle(&mut events) {
            self.phase = Phase::EnemyResolving;
        }
        self.narrate(&events);
        debug!(phase = ?self.phase, "player turn ended");
        Ok(self.phase)
    }

    fn check_player_turn(&self) -> Result<(), Rejection> {
        match self.phase {
            Phase::PlayerTurn => Ok(()),
            Phase::BattleOver(_) => Err(Rejection::BattleOver),
            _ => Err(Rejection::NotPlayerTurn),
        }
    }

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        debug!(%rejection, "action rejected");
        self.narrate(&[Narration::Rejected(rejection.clone())]);
        rejection
    }

    // =========================================================================
    // Enemy phase
    // =========================================================================

    /// Run one presentation beat of the enemy phase.
    ///
    /// A no-op during [`Phase::PlayerTurn`] and after the battle ends.
    pub fn advance(&mut self) -> Phase {
        let mut events = Vec::new();
        match self.phase {
            Phase::EnemyResolving => {
                events.extend(self.start_of_turn(Side::Enemy));
                if !self.settle(&mut events) {
                    self.phase = Phase::EnemyTurn;
                }
            }
            Phase::EnemyTurn => {
                self.enemy_moves(&mut events);
                if !self.settle(&mut events) {
                    events.extend(self.end_of_turn(Side::Enemy));
                    if !self.settle(&mut events) {
                        self.phase = Phase::PlayerResolving;
                    }
                }
            }
            Phase::PlayerResolving => {
                self.state.advance_turn();
                events.push(Narration::TurnStarted {
                    number: self.state.turn.number,
                });

                let drain = self.state.player.statuses.remove(StatusKind::EnergyDrain);
                self.state.player.refill_energy(drain);
                events.extend(self.start_of_turn(Side::Player));

                if !self.settle(&mut events) {
                    let count = self
                        .state
                        .draw_for_player(self.config.turn_draw as usize, &mut self.rng);
                    events.push(Narration::Drew { count });
                    self.phase = Phase::PlayerTurn;
                }
            }
            Phase::PlayerTurn | Phase::BattleOver(_) => return self.phase,
        }

        self.narrate(&events);
        info!(phase = ?self.phase, turn = self.state.turn.number, "phase advanced");
        self.phase
    }

    /// Advance until the player may act again or the battle ends.
    pub fn run_enemy_phase(&mut self) -> Phase {
        while self.phase.is_enemy_phase() {
            self.advance();
        }
        self.phase
    }

    /// Like [`Battle::run_enemy_phase`], sleeping `enemy_delay` between beats.
    pub async fn run_enemy_phase_paced(&mut self) -> Phase {
        while self.phase.is_enemy_phase() {
            tokio::time::sleep(self.config.enemy_delay()).await;
            self.advance();
        }
        self.phase
    }

    /// Execute the telegraphed move, plus at most one extra action.
    fn enemy_moves(&mut self, events: &mut Vec<Narration>) {
        let mut actions = 0;
        loop {
            let Some(card) = self.state.enemy.pending_move().cloned() else {
                self.select_intent(events);
                return;
            };

            match CardResolver::validate(&card, Side::Enemy, &self.state) {
                Err(Rejection::Stunned) => {
                    // The telegraphed move waits for the next turn.
                    events.push(Narration::Stunned { side: Side::Enemy });
                    self.state.record(Side::Enemy, Action::Skip);
                    return;
                }
                Err(rejection) => {
                    events.push(Narration::Rejected(rejection));
                    self.state.record(Side::Enemy, Action::Skip);
                    self.select_intent(events);
                    return;
                }
                Ok(()) => {}
            }

            self.state.enemy.set_pending_move(None);
            self.state.record(Side::Enemy, Action::Play(card.id));
            let resolution = CardResolver::apply(&card, Side::Enemy, &mut self.state, &mut self.rng);
            events.extend(resolution.events);
            if resolution.terminal.is_some() {
                return;
            }

            self.select_intent(events);
            actions += 1;
            if resolution.extra_action && actions < 2 {
                events.push(Narration::ExtraAction { side: Side::Enemy });
                continue;
            }
            return;
        }
    }

    /// Ask the policy for the next telegraphed move.
    fn select_intent(&mut self, events: &mut Vec<Narration>) {
        let ctx = PolicyContext::observe(&self.state, &self.config);
        let next = self
            .policy
            .select_move(self.state.enemy.move_pool(), &ctx, &mut self.rng);
        if let Some(card) = &next {
            events.push(Narration::Intent {
                card: card.name.clone(),
                value: card.intent_value(),
            });
        }
        self.state.enemy.set_pending_move(next);
    }

    // =========================================================================
    // Turn-boundary passives
    // =========================================================================

    /// Turn-start ticks, Fortify, Involution.
    fn start_of_turn(&mut self, side: Side) -> Vec<Narration> {
        let mut events = Vec::new();
        let (me, opponent) = self.state.pair_mut(side);

        me.statuses.tick_all(Decay::TurnStart);

        let fortify = me.statuses.get(StatusKind::Fortify);
        if fortify > 0 {
            me.gain_shield(fortify);
            events.push(Narration::ShieldGained {
                side,
                amount: fortify,
            });
        }

        let involution = me.statuses.get(StatusKind::Involution);
        if involution > 0 {
            for (who, combatant) in [(side, me), (side.opponent(), opponent)] {
                let lost = combatant.lose_health(involution);
                events.push(Narration::StatusTriggered {
                    side: who,
                    kind: StatusKind::Involution,
                    amount: -lost,
                });
            }
        }
        events
    }

    /// Overtime drain, Poison, Regen, then turn-end ticks.
    fn end_of_turn(&mut self, side: Side) -> Vec<Narration> {
        let mut events = Vec::new();
        let me = self.state.combatant_mut(side);

        if me.statuses.has(StatusKind::Overtime) {
            let lost = me.lose_health(self.config.overtime_drain);
            events.push(Narration::StatusTriggered {
                side,
                kind: StatusKind::Overtime,
                amount: -lost,
            });
        }

        let poison = me.statuses.get(StatusKind::Poison);
        if poison > 0 {
            let lost = me.lose_health(poison);
            events.push(Narration::StatusTriggered {
                side,
                kind: StatusKind::Poison,
                amount: -lost,
            });
        }

        let regen = me.statuses.get(StatusKind::Regen);
        if regen > 0 {
            let healed = me.heal(regen);
            events.push(Narration::StatusTriggered {
                side,
                kind: StatusKind::Regen,
                amount: healed,
            });
        }

        me.statuses.tick_all(Decay::TurnEnd);
        events
    }

    // =========================================================================
    // Bookkeeping
    // =========================================================================

    /// End the battle if either side is down. Returns whether it ended.
    fn settle(&mut self, events: &mut Vec<Narration>) -> bool {
        if self.phase.is_over() {
            return true;
        }
        match self.state.outcome() {
            Some(outcome) => {
                if !events.contains(&Narration::BattleEnded(outcome)) {
                    events.push(Narration::BattleEnded(outcome));
                }
                self.finish(outcome);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        self.phase = Phase::BattleOver(outcome);
        info!(
            %outcome,
            turn = self.state.turn.number,
            player_health = self.state.player.health(),
            enemy_health = self.state.enemy.health(),
            "battle over"
        );
    }

    fn narrate(&mut self, events: &[Narration]) {
        let player = self.state.player.name.clone();
        let enemy = self.state.enemy.name.clone();
        self.log.extend(events, &player, &enemy);
    }
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("phase", &self.phase)
            .field("turn", &self.state.turn.number)
            .field("player_health", &self.state.player.health())
            .field("enemy_health", &self.state.enemy.health())
            .finish_non_exhaustive()
    }
}
