use std::fs;

use battle_content::{ConstructCatalog, ProgramBuilder, ProgramLoader};
use battle_core::{ActionCatalog, Position, TriggerCatalog};
use battle_sim::{RunReport, Simulation};
use tempfile::TempDir;

fn run_from_disk(seed: u64) -> RunReport {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dodger.ron");
    fs::write(
        &path,
        r#"(protocols: [
            (trigger: "just_damaged", action: "dodge", priority: 5),
            (trigger: "different_row", action: "align", priority: 3),
            (trigger: "always", action: "flame_shot", priority: 1),
        ])"#,
    )
    .unwrap();

    let spec = ProgramLoader::load(&path).unwrap();
    let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
    let program = ProgramBuilder::new(&triggers, &actions).build(&spec).unwrap();
    let constructs = ConstructCatalog::builtin().unwrap();

    Simulation::builder()
        .player(
            constructs.spawn("striker", Position::new(1, 1)).unwrap(),
            program.clone(),
        )
        .enemy(
            constructs.spawn("phantom", Position::new(4, 1)).unwrap(),
            program,
        )
        .seed(seed)
        .build()
        .unwrap()
        .run(16, 180_000)
}

#[test]
fn same_seed_replays_the_same_battle() {
    let first = run_from_disk(11);
    let second = run_from_disk(11);

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.elapsed_ms, second.elapsed_ms);
    assert_eq!(first.history, second.history);
    assert_eq!(first.final_state, second.final_state);
}

#[test]
fn report_serializes_to_json() {
    let report = run_from_disk(1);
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("history").is_some_and(|h| h.is_array()));
    assert_eq!(json["elapsed_ms"], report.elapsed_ms);
}
