//! Headless battle runner binary.
//!
//! Loads two constructs and two rule programs, simulates the battle at a
//! fixed cadence and prints the outcome with the HP history.
//!
//! # Examples
//!
//! ```bash
//! battle-sim --player-construct striker --enemy-construct bulwark \
//!     --player-program gunner --enemy-program brawler \
//!     --data-dir crates/battle/content/data --seed 7
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_content::{
    ConfigLoader, ConstructCatalog, ContentFactory, PlayerProgress, ProgramBuilder, ProgramLoader,
    ProgramSpec, ProgressLoader,
};
use battle_core::{ActionCatalog, BattleConfig, Millis, Position, TriggerCatalog};
use battle_sim::{RunReport, SimConfig, Simulation};
use clap::Parser;

/// Simulate one construct battle.
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Headless construct battle runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Construct id for the player side
    #[arg(long)]
    player_construct: String,

    /// Construct id for the enemy side
    #[arg(long)]
    enemy_construct: String,

    /// Player program: a RON file, or a program name under `<data-dir>/programs`
    #[arg(long)]
    player_program: String,

    /// Enemy program: a RON file, or a program name under `<data-dir>/programs`
    #[arg(long)]
    enemy_program: String,

    /// Content directory (constructs.ron, config.toml, progress.ron, programs/)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Battle tuning TOML (overrides `<data-dir>/config.toml`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player progress RON; enforces unlocks and applies upgrades to the player program
    #[arg(long)]
    progress: Option<PathBuf>,

    /// RNG seed [env: BATTLE_SEED]
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per tick [env: BATTLE_TICK_MS]
    #[arg(long)]
    dt: Option<Millis>,

    /// Give up after this much simulated time [env: BATTLE_MAX_MS]
    #[arg(long)]
    max_ms: Option<Millis>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BATTLE_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sim_config = SimConfig::from_env().with_overrides(cli.seed, cli.dt, cli.max_ms);
    let factory = cli.data_dir.as_deref().map(ContentFactory::new);

    let constructs = match &factory {
        Some(factory) => factory.load_constructs()?,
        None => ConstructCatalog::builtin()?,
    };
    let battle_config = load_battle_config(cli.config.as_deref(), factory.as_ref())?;
    let progress = load_progress(cli.progress.as_deref(), factory.as_ref())?;

    let triggers = TriggerCatalog::builtin();
    let actions = ActionCatalog::builtin();
    let enemy_builder = ProgramBuilder::new(&triggers, &actions);
    let player_builder = match &progress {
        Some(progress) => enemy_builder.clone().with_progress(progress),
        None => enemy_builder.clone(),
    };

    let player_spec = load_program(&cli.player_program, factory.as_ref())?;
    let enemy_spec = load_program(&cli.enemy_program, factory.as_ref())?;
    let player_program = player_builder
        .build(&player_spec)
        .with_context(|| format!("Failed to build player program '{}'", player_spec.name))?;
    let enemy_program = enemy_builder
        .build(&enemy_spec)
        .with_context(|| format!("Failed to build enemy program '{}'", enemy_spec.name))?;

    let player = constructs
        .spawn(&cli.player_construct, Position::new(1, 1))
        .with_context(|| format!("Unknown construct '{}'", cli.player_construct))?;
    let enemy = constructs
        .spawn(&cli.enemy_construct, Position::new(4, 1))
        .with_context(|| format!("Unknown construct '{}'", cli.enemy_construct))?;

    tracing::info!(
        player = %cli.player_construct,
        enemy = %cli.enemy_construct,
        seed = sim_config.seed,
        tick_ms = sim_config.tick_ms,
        "starting battle"
    );

    let mut simulation = Simulation::builder()
        .player(player, player_program)
        .enemy(enemy, enemy_program)
        .config(battle_config)
        .seed(sim_config.seed)
        .build()?;
    let report = simulation.run(sim_config.tick_ms, sim_config.max_ms);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Resolve a program argument: existing files are read directly, bare names
/// are looked up in the data directory.
fn load_program(arg: &str, factory: Option<&ContentFactory>) -> Result<ProgramSpec> {
    let path = Path::new(arg);
    if path.exists() {
        return ProgramLoader::load(path);
    }
    match factory {
        Some(factory) => factory.load_program(arg),
        None => anyhow::bail!("Program '{}' not found (pass a file or --data-dir)", arg),
    }
}

fn load_battle_config(
    path: Option<&Path>,
    factory: Option<&ContentFactory>,
) -> Result<BattleConfig> {
    match (path, factory) {
        (Some(path), _) => ConfigLoader::load(path),
        (None, Some(factory)) => factory.load_config(),
        (None, None) => Ok(BattleConfig::default()),
    }
}

fn load_progress(
    path: Option<&Path>,
    factory: Option<&ContentFactory>,
) -> Result<Option<PlayerProgress>> {
    match (path, factory) {
        (Some(path), _) => ProgressLoader::load(path).map(Some),
        (None, Some(factory)) => factory.load_progress(),
        (None, None) => Ok(None),
    }
}

fn print_summary(report: &RunReport) {
    let verdict = match report.outcome {
        Some(outcome) if outcome.player_won() => "player won",
        Some(_) => "enemy won",
        None => "no outcome (time limit)",
    };
    println!(
        "{verdict} after {} ms ({} ticks)",
        report.elapsed_ms, report.ticks
    );

    let state = &report.final_state;
    println!(
        "final HP  player {:>6.1}/{:<6.1}  enemy {:>6.1}/{:<6.1}",
        state.player.hp.current,
        state.player.hp.maximum,
        state.enemy.hp.current,
        state.enemy.hp.maximum
    );

    println!("history:");
    for sample in &report.history {
        println!(
            "  {:>7} ms  player {:>6.1}  enemy {:>6.1}",
            sample.time_ms, sample.player_hp, sample.enemy_hp
        );
    }
}
