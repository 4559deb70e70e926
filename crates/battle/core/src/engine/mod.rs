//! Tick-driven battle engine.
//!
//! The [`BattleEngine`] owns one battle. Each [`tick`](BattleEngine::tick)
//! advances simulated time and runs a fixed sequence of phases:
//!
//! ```text
//! time & history → burn → expiry & regen → pending effects
//!   → projectiles & hits → terminal check
//!   → player acts → enemy acts → reset damage flags
//! ```
//!
//! Nothing is scheduled outside `tick`; deferred sub-effects sit in a
//! simulated-time queue. Once an outcome is reached the engine is frozen and
//! every later `tick` returns the terminal update again.

mod apply;
mod cooldown;
mod pending;
mod update;

pub use cooldown::Cooldowns;
pub use update::{BattleEvent, BattleResult, BattleUpdate, SideUpdate, UpdateFields};

use pending::PendingQueue;
use update::TickSnapshot;

use crate::action::BattleContext;
use crate::combat::{self, Hit};
use crate::config::BattleConfig;
use crate::env::{BattleRng, PcgRng};
use crate::program::RuleProgram;
use crate::state::{
    BattleOutcome, BattleState, CosmeticLoadout, InitialState, InitializationError, Millis,
    ProjectileFlavor, ProjectileId, Side, StatusKind,
};

/// Upper bound on history boundaries replayed by one oversized tick.
const MAX_CATCH_UP: Millis = 256;

/// Simulation core for a single battle.
///
/// Generic over the random source so tests can script rolls; production
/// code uses the seeded [`PcgRng`].
#[derive(Clone, Debug)]
pub struct BattleEngine<R = PcgRng> {
    state: BattleState,
    config: BattleConfig,
    player_program: RuleProgram,
    enemy_program: RuleProgram,
    cooldowns: [Cooldowns; 2],
    pending: PendingQueue,
    rng: R,
    /// "Just took damage" flags, reset at the end of every tick.
    damaged: [bool; 2],
    next_projectile_id: u32,
    next_sample_at: Millis,
    next_burn_at: Millis,
    terminal: Option<BattleUpdate>,
}

impl BattleEngine<PcgRng> {
    /// Validates `initial` and sets up a battle with default tuning and a
    /// zero-seeded RNG.
    pub fn new(
        initial: InitialState,
        player_program: RuleProgram,
        enemy_program: RuleProgram,
        player_cosmetics: Option<CosmeticLoadout>,
        enemy_cosmetics: Option<CosmeticLoadout>,
    ) -> Result<Self, InitializationError> {
        initial.validate()?;

        let config = BattleConfig::default();
        let next_projectile_id = initial
            .projectiles
            .iter()
            .map(|p| p.id.0 + 1)
            .max()
            .unwrap_or(0);
        let state = BattleState::from_initial(initial, player_cosmetics, enemy_cosmetics);

        tracing::debug!(
            player = %state.player.position,
            enemy = %state.enemy.position,
            player_protocols = player_program.len(),
            enemy_protocols = enemy_program.len(),
            "battle initialized"
        );

        Ok(Self {
            state,
            next_sample_at: config.history_interval_ms.max(1),
            next_burn_at: config.burn_interval_ms.max(1),
            config,
            player_program,
            enemy_program,
            cooldowns: Default::default(),
            pending: PendingQueue::new(),
            rng: PcgRng::default(),
            damaged: [false; 2],
            next_projectile_id,
            terminal: None,
        })
    }
}

impl<R: BattleRng> BattleEngine<R> {
    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.next_sample_at = config.history_interval_ms.max(1);
        self.next_burn_at = config.burn_interval_ms.max(1);
        self.config = config;
        self
    }

    /// Replaces the random source.
    pub fn with_rng<S: BattleRng>(self, rng: S) -> BattleEngine<S> {
        BattleEngine {
            state: self.state,
            config: self.config,
            player_program: self.player_program,
            enemy_program: self.enemy_program,
            cooldowns: self.cooldowns,
            pending: self.pending,
            rng,
            damaged: self.damaged,
            next_projectile_id: self.next_projectile_id,
            next_sample_at: self.next_sample_at,
            next_burn_at: self.next_burn_at,
            terminal: self.terminal,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn cooldowns(&self, side: Side) -> &Cooldowns {
        &self.cooldowns[index(side)]
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Advances the battle by `delta_ms` and reports what changed.
    pub fn tick(&mut self, delta_ms: Millis) -> BattleUpdate {
        if let Some(terminal) = &self.terminal {
            return terminal.clone();
        }

        let snapshot = TickSnapshot::capture(&self.state);
        let mut events = Vec::new();

        let previous = self.state.time_ms;
        self.state.time_ms = previous.saturating_add(delta_ms);
        let now = self.state.time_ms;
        let delta_ms = now - previous;

        // 1. History
        self.sample_history(now);

        // 2. Burn
        self.burn(now, &mut events);

        // 3. Expiry and regeneration
        self.expire_and_regenerate(now, delta_ms);

        // 4. Deferred effects
        while let Some((due, effect)) = self.pending.pop_due(now) {
            tracing::trace!(due, ?effect, "pending effect");
            self.resolve_pending(effect, &mut events);
        }

        // 5-6. Projectiles
        self.advance_projectiles(previous, now, &mut events);

        // 7-8. Terminal check, then one action per side
        if !self.check_terminal() {
            for side in Side::BOTH {
                self.act(side, delta_ms, &mut events);
                if self.check_terminal() {
                    break;
                }
            }
        }

        // 9.
        self.damaged = [false; 2];

        let update = snapshot.diff(&self.state, events);
        if update.is_terminal() {
            self.terminal = Some(update.clone());
        }
        update
    }

    // ========================================================================
    // Phases
    // ========================================================================

    /// Records one sample per history boundary crossed, keeping at most
    /// [`MAX_CATCH_UP`] of them for a single tick.
    fn sample_history(&mut self, now: Millis) {
        let interval = self.config.history_interval_ms.max(1);
        if self.next_sample_at > now {
            return;
        }
        let behind = (now - self.next_sample_at) / interval;
        if behind > MAX_CATCH_UP {
            self.next_sample_at += (behind - MAX_CATCH_UP) * interval;
        }
        while self.next_sample_at <= now {
            self.state.record_sample(self.next_sample_at);
            match self.next_sample_at.checked_add(interval) {
                Some(next) => self.next_sample_at = next,
                None => break,
            }
        }
    }

    fn burn(&mut self, now: Millis, events: &mut Vec<BattleEvent>) {
        let interval = self.config.burn_interval_ms.max(1);
        while self.next_burn_at <= now {
            let at = self.next_burn_at;
            let mut burning = false;
            for side in Side::BOTH {
                let fighter = self.state.fighter_mut(side);
                fighter.status.remove_expired(at);
                burning |= fighter.status.count(StatusKind::Burn) > 0;
                let amount = combat::apply_burn(fighter, at, &self.config.status);
                if amount > 0.0 {
                    tracing::trace!(%side, amount, at, "burn tick");
                    self.damaged[index(side)] = true;
                    events.push(BattleEvent::BurnDamage { side, amount });
                }
            }

            // Nothing left to burn: jump to the first boundary after `now`.
            let skipped = if burning { 1 } else { (now - at) / interval + 1 };
            match skipped.checked_mul(interval).and_then(|gap| at.checked_add(gap)) {
                Some(next) => self.next_burn_at = next,
                None => {
                    self.next_burn_at = Millis::MAX;
                    break;
                }
            }
        }
    }

    fn expire_and_regenerate(&mut self, now: Millis, delta_ms: Millis) {
        for side in Side::BOTH {
            let fighter = self.state.fighter_mut(side);
            let expired = fighter.status.remove_expired(now);
            if expired > 0 {
                tracing::trace!(%side, expired, "status stacks expired");
            }
            fighter.defenses.remove_expired(now);
            fighter.remove_expired_buffs(now);

            if !fighter.status.shield_regen_disabled {
                if let Some(shields) = fighter.shields.as_mut() {
                    shields.regenerate(now, delta_ms);
                }
            }
        }
    }

    fn advance_projectiles(
        &mut self,
        previous: Millis,
        now: Millis,
        events: &mut Vec<BattleEvent>,
    ) {
        let step = self.config.projectile_step(now - previous);
        let turn = i32::try_from(self.config.frames_between(previous, now)).unwrap_or(i32::MAX);
        let radius = self.config.hit_radius;
        let flying = std::mem::take(&mut self.state.projectiles);
        let mut survivors = Vec::with_capacity(flying.len());

        for mut projectile in flying {
            projectile.x += projectile.direction as f32 * step;

            let target = self.state.fighter(projectile.target()).position;
            if projectile.flavor == ProjectileFlavor::Homing {
                let gap = target.y - projectile.row;
                projectile.row += gap.signum() * gap.abs().min(turn);
            }

            if projectile.out_of_bounds() {
                tracing::trace!(id = projectile.id.0, x = projectile.x, "projectile left grid");
                continue;
            }

            let connects =
                projectile.row == target.y && (projectile.x - target.x as f32).abs() <= radius;
            if !connects {
                survivors.push(projectile);
                continue;
            }

            tracing::debug!(
                id = projectile.id.0,
                owner = %projectile.owner,
                damage = projectile.damage,
                "projectile hit"
            );
            self.strike(
                projectile.owner,
                Hit::from_projectile(&projectile),
                Some(projectile.id),
                events,
            );
        }

        self.state.projectiles = survivors;
    }

    /// Selects and fires at most one protocol for `side`.
    fn act(&mut self, side: Side, delta_ms: Millis, events: &mut Vec<BattleEvent>) {
        let slot = index(side);
        self.cooldowns[slot].advance(delta_ms);

        let now = self.state.time_ms;
        let ctx = BattleContext::capture(&self.state, side, self.damaged[slot]);
        let lag = self.lag_stacks(side) as f32;
        let failure_chance = lag * self.config.status.lag_failure_per_stack;

        let program = match side {
            Side::Player => &self.player_program,
            Side::Enemy => &self.enemy_program,
        };
        let cooldowns = &self.cooldowns[slot];
        let rng = &mut self.rng;
        let mut stuttered = Vec::new();

        let chosen = program.select(
            &ctx,
            |action| cooldowns.is_ready(&action.id),
            |protocol| {
                let stutter = rng.chance(failure_chance);
                if stutter {
                    stuttered.push(protocol.action.id.clone());
                }
                stutter
            },
        );
        let fired = chosen.map(|protocol| {
            let action = &protocol.action;
            (
                action.id.clone(),
                action.cooldown_ms,
                action.execute(&ctx, &mut *rng),
            )
        });

        events.extend(
            stuttered
                .into_iter()
                .map(|action_id| BattleEvent::Stuttered { side, action_id }),
        );

        let Some((action_id, base_cooldown, result)) = fired else {
            return;
        };

        let lag_multiplier = 1.0 + lag * self.config.status.lag_cooldown_per_stack;
        let cooldown = base_cooldown as f32
            * lag_multiplier
            * self.state.fighter(side).cooldown_multiplier(now);
        self.cooldowns[slot].start(&action_id, cooldown);

        tracing::debug!(
            %side,
            action = %action_id,
            result = result.label(),
            cooldown,
            "action fired"
        );
        events.push(BattleEvent::ActionFired {
            side,
            action_id,
            result: result.label().to_owned(),
        });
        self.apply_result(side, result, events);
    }

    /// Ends the battle if either side is down. Returns true when terminal.
    fn check_terminal(&mut self) -> bool {
        if self.state.is_over() {
            return true;
        }
        let player_down = self.state.player.is_defeated();
        let enemy_down = self.state.enemy.is_defeated();
        if !player_down && !enemy_down {
            return false;
        }

        let outcome = if enemy_down && !player_down {
            BattleOutcome::PlayerWon
        } else {
            BattleOutcome::EnemyWon
        };
        let now = self.state.time_ms;
        self.state.outcome = Some(outcome);
        self.state.record_sample(now);

        tracing::info!(
            %outcome,
            time_ms = now,
            player_hp = self.state.player.hp.current,
            enemy_hp = self.state.enemy.hp.current,
            "battle over"
        );
        true
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Lag stacks that count against `side`'s cooldowns and stutter rolls.
    fn lag_stacks(&self, side: Side) -> usize {
        if side.is_player() && !self.config.lag_affects_player {
            return 0;
        }
        self.state.fighter(side).status.count(StatusKind::Lag)
    }

    fn next_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;
        id
    }
}

const fn index(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Enemy => 1,
    }
}
