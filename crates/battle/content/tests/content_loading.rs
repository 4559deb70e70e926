use std::fs;

use battle_content::{
    BuildError, ConfigLoader, ConstructCatalog, ContentFactory, ProgramBuilder, ProgramLoader,
    ProgressLoader,
};
use battle_core::{ActionCatalog, BattleEngine, InitialState, Position, TriggerCatalog};
use tempfile::TempDir;

const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[test]
fn every_bundled_program_builds() {
    let factory = ContentFactory::new(BUNDLED);
    let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
    let builder = ProgramBuilder::new(&triggers, &actions);

    for name in ["gunner", "brawler", "sniper", "saboteur"] {
        let spec = factory.load_program(name).unwrap();
        let program = builder.build(&spec).unwrap();
        assert_eq!(program.len(), spec.protocols.len(), "{name}");
    }
}

#[test]
fn loads_program_from_disk_and_names_it_after_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("turret.ron");
    fs::write(
        &path,
        r#"(protocols: [(trigger: "always", action: "basic_shot", priority: 1)])"#,
    )
    .unwrap();

    let spec = ProgramLoader::load(&path).unwrap();
    assert_eq!(spec.name, "turret");
    assert_eq!(spec.protocols.len(), 1);
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nowhere.ron");
    let err = ProgramLoader::load(&path).unwrap_err();
    assert!(err.to_string().contains("nowhere.ron"));
}

#[test]
fn progress_gates_program_building() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.ron");
    fs::write(
        &path,
        r#"(unlocked_actions: ["basic_shot"], unlocked_triggers: ["always"])"#,
    )
    .unwrap();
    let progress = ProgressLoader::load(&path).unwrap();

    let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
    let spec = ContentFactory::new(BUNDLED).load_program("gunner").unwrap();
    let result = ProgramBuilder::new(&triggers, &actions)
        .with_progress(&progress)
        .build(&spec);

    assert!(matches!(result, Err(BuildError::Locked { kind: "trigger", .. })));
}

#[test]
fn data_directory_overrides_bundled_constructs() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("constructs.ron"),
        r#"[(id: "training_dummy", name: "Training Dummy", max_hp: 50.0)]"#,
    )
    .unwrap();
    fs::write(dir.path().join("config.toml"), "hit_radius = 0.4\n").unwrap();

    let factory = ContentFactory::new(dir.path());
    let constructs = factory.load_constructs().unwrap();
    assert_eq!(constructs.len(), 1);
    assert!(constructs.get("striker").is_none());
    assert_eq!(factory.load_config().unwrap().hit_radius, 0.4);
    assert!(factory.load_progress().unwrap().is_none());
}

#[test]
fn invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "hit_radius = \"wide\"\n").unwrap();
    assert!(ConfigLoader::load(&path).is_err());
}

#[test]
fn bundled_content_drives_a_full_battle() {
    let factory = ContentFactory::new(BUNDLED);
    let constructs = ConstructCatalog::builtin().unwrap();
    let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
    let builder = ProgramBuilder::new(&triggers, &actions);

    let player = constructs.spawn("striker", Position::new(1, 1)).unwrap();
    let enemy = constructs.spawn("bulwark", Position::new(4, 1)).unwrap();
    let player_program = builder.build(&factory.load_program("gunner").unwrap()).unwrap();
    let enemy_program = builder.build(&factory.load_program("brawler").unwrap()).unwrap();

    let mut engine = BattleEngine::new(
        InitialState::new(player, enemy),
        player_program,
        enemy_program,
        None,
        None,
    )
    .unwrap()
    .with_config(factory.load_config().unwrap());

    let mut finished = false;
    for _ in 0..(180_000 / 16) {
        if engine.tick(16).is_terminal() {
            finished = true;
            break;
        }
    }
    assert!(finished, "battle did not finish within three minutes");
    let state = engine.state();
    assert!(state.player.is_defeated() || state.enemy.is_defeated());
}
