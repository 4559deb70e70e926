//! Simulation builder.

use anyhow::{Context, Result};
use battle_core::{BattleConfig, BattleEngine, Fighter, InitialState, PcgRng, RuleProgram};

use crate::Simulation;

/// Builder for constructing a [`Simulation`] with proper validation.
///
/// Both fighters and both programs are required; tuning and seed fall back
/// to defaults.
#[derive(Default)]
pub struct SimulationBuilder {
    player: Option<(Fighter, RuleProgram)>,
    enemy: Option<(Fighter, RuleProgram)>,
    config: Option<BattleConfig>,
    seed: u64,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the player fighter and its program (required).
    pub fn player(mut self, fighter: Fighter, program: RuleProgram) -> Self {
        self.player = Some((fighter, program));
        self
    }

    /// Set the enemy fighter and its program (required).
    pub fn enemy(mut self, fighter: Fighter, program: RuleProgram) -> Self {
        self.enemy = Some((fighter, program));
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the simulation.
    ///
    /// # Errors
    ///
    /// Returns an error if a side is missing or the initial state is invalid.
    pub fn build(self) -> Result<Simulation> {
        let (player, player_program) = self.player.context("Player side is required")?;
        let (enemy, enemy_program) = self.enemy.context("Enemy side is required")?;

        let engine = BattleEngine::new(
            InitialState::new(player, enemy),
            player_program,
            enemy_program,
            None,
            None,
        )
        .context("Invalid initial battle state")?
        .with_config(self.config.unwrap_or_default())
        .with_rng(PcgRng::seed_from_u64(self.seed));

        Ok(Simulation::new(engine))
    }
}
