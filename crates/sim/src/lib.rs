//! Headless battle runner.
//!
//! Drives one [`BattleEngine`] at a fixed cadence until it reaches an
//! outcome or a time limit, and reports the result.

mod builder;
pub mod config;

pub use builder::SimulationBuilder;
pub use config::SimConfig;

use battle_core::{BattleEngine, BattleOutcome, BattleState, HistorySample, Millis, PcgRng};
use serde::Serialize;

/// One battle being simulated.
pub struct Simulation {
    engine: BattleEngine<PcgRng>,
}

/// Summary of a finished (or abandoned) run.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// `None` when the time limit was hit first.
    pub outcome: Option<BattleOutcome>,
    pub elapsed_ms: Millis,
    pub ticks: u64,
    pub history: Vec<HistorySample>,
    pub final_state: BattleState,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    pub(crate) fn new(engine: BattleEngine<PcgRng>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &BattleEngine<PcgRng> {
        &self.engine
    }

    /// Ticks by `tick_ms` until the battle ends or `max_ms` has elapsed.
    pub fn run(&mut self, tick_ms: Millis, max_ms: Millis) -> RunReport {
        let tick_ms = tick_ms.max(1);
        let mut ticks = 0u64;

        while !self.engine.is_over() && self.engine.state().time_ms < max_ms {
            let update = self.engine.tick(tick_ms);
            ticks += 1;
            for event in &update.events {
                tracing::trace!(time_ms = update.time_ms, ?event, "battle event");
            }
        }

        let state = self.engine.state();
        if state.outcome.is_none() {
            tracing::warn!(
                max_ms,
                player_hp = state.player.hp.current,
                enemy_hp = state.enemy.hp.current,
                "time limit reached without an outcome"
            );
        }

        RunReport {
            outcome: state.outcome,
            elapsed_ms: state.time_ms,
            ticks,
            history: state.history.clone(),
            final_state: state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ActionCatalog, Fighter, Position, Protocol, RuleProgram, TriggerCatalog};

    fn shooter() -> RuleProgram {
        let triggers = TriggerCatalog::builtin();
        let actions = ActionCatalog::builtin();
        RuleProgram::new(vec![Protocol::new(
            triggers.get("always").unwrap().clone(),
            actions.get("basic_shot").unwrap().clone(),
            1,
        )])
    }

    #[test]
    fn build_requires_both_sides() {
        let result = Simulation::builder()
            .player(Fighter::new(Position::new(1, 1), 100.0), shooter())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn run_stops_at_outcome() {
        let mut sim = Simulation::builder()
            .player(Fighter::new(Position::new(1, 1), 120.0), shooter())
            .enemy(Fighter::new(Position::new(4, 1), 50.0), shooter())
            .seed(3)
            .build()
            .unwrap();

        let report = sim.run(16, 60_000);
        assert_eq!(report.outcome, Some(BattleOutcome::PlayerWon));
        assert!(report.elapsed_ms < 60_000);
        assert_eq!(report.history.last().map(|s| s.enemy_hp), Some(0.0));
    }

    #[test]
    fn run_gives_up_at_time_limit() {
        let mut sim = Simulation::builder()
            .player(Fighter::new(Position::new(1, 0), 100.0), RuleProgram::default())
            .enemy(Fighter::new(Position::new(4, 2), 100.0), RuleProgram::default())
            .build()
            .unwrap();

        let report = sim.run(100, 1_000);
        assert!(report.outcome.is_none());
        assert_eq!(report.elapsed_ms, 1_000);
        assert_eq!(report.ticks, 10);
    }
}
