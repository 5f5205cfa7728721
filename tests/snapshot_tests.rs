//! Snapshot Integration Tests
//!
//! Tests for persisting a fully inferred graph and answering the same
//! questions from the reloaded file.

use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};

use allegiance_graph::store::{load_snapshot, save_snapshot};
use allegiance_graph::{
    CharacterRecord, Config, GraphError, GraphSession, NodeKind, RelationKind,
};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn test_data_dir() -> std::path::PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::path::PathBuf::from(format!(
        "target/test_snapshots_{}_{}",
        std::process::id(),
        id
    ))
}

fn cleanup_dir(path: &std::path::Path) {
    let _ = fs::remove_dir_all(path);
}

fn westeros() -> Vec<CharacterRecord> {
    vec![
        CharacterRecord::named("Ned").with_house("Stark"),
        CharacterRecord::named("Cat")
            .with_house("Tully")
            .with_spouse("Ned"),
        CharacterRecord::named("Robb")
            .with_house("Stark")
            .with_father("Ned")
            .with_mother("Cat"),
        CharacterRecord::named("Tywin")
            .with_house("Lannister")
            .with_heir("Jaime"),
        CharacterRecord::named("Jaime").with_house("Lannister"),
    ]
}

#[test]
fn test_reloaded_snapshot_gives_same_report() {
    let dir = test_data_dir();
    let path = dir.join("graph.jsonl");

    let mut session = GraphSession::in_memory(Config::default());
    let report = session.run(&westeros()).unwrap();

    let meta = save_snapshot(&path, &session.store().snapshot()).unwrap();
    assert_eq!(meta.node_count, 8);
    assert_eq!(meta.relation_count, session.store().relation_count());

    let restored = GraphSession::from_snapshot(load_snapshot(&path).unwrap(), Config::default())
        .unwrap();
    assert_eq!(restored.analyze().unwrap(), report);
    assert_eq!(
        restored
            .store()
            .find_node_by_key(NodeKind::House, "Tully"),
        session.store().find_node_by_key(NodeKind::House, "Tully")
    );
    assert_eq!(
        restored.store().relations_of_type(RelationKind::Ally).len(),
        4
    );

    cleanup_dir(&dir);
}

#[test]
fn test_restored_session_rejects_ingest() {
    let dir = test_data_dir();
    let path = dir.join("graph.jsonl");

    let mut session = GraphSession::in_memory(Config::default());
    session.run(&westeros()).unwrap();
    save_snapshot(&path, &session.store().snapshot()).unwrap();

    let mut restored =
        GraphSession::from_snapshot(load_snapshot(&path).unwrap(), Config::default()).unwrap();
    assert!(matches!(
        restored.ingest(&westeros()),
        Err(GraphError::PhaseOrder(_))
    ));

    cleanup_dir(&dir);
}

#[test]
fn test_truncated_snapshot_is_rejected() {
    let dir = test_data_dir();
    let path = dir.join("graph.jsonl");

    let mut session = GraphSession::in_memory(Config::default());
    session.run(&westeros()).unwrap();
    save_snapshot(&path, &session.store().snapshot()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let kept: Vec<&str> = content.lines().take(4).collect();
    fs::write(&path, kept.join("\n")).unwrap();

    assert!(matches!(load_snapshot(&path), Err(GraphError::Snapshot(_))));

    cleanup_dir(&dir);
}

#[test]
fn test_missing_snapshot_file() {
    let dir = test_data_dir();
    let err = load_snapshot(dir.join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, GraphError::Io(_)));
}
