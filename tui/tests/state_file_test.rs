//! State File Tests
//!
//! Exercise [`StateFileSource`] against real files and run the refresh loop
//! end to end with a scheduler simulated by rewriting the file.

use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskboard_core::{BoardConfig, GlyphSet, LifecycleState, MemorySink};
use taskboard_tui::{App, SnapshotSource, SourceError, StateFileSource, Tick};

fn state_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

const RUNNING: &str = r#"[
    {"title": "users", "state": "stacked", "waiting_on": ["groups"]},
    {"title": "groups", "state": "running", "total_count": 1200,
     "counters": {"success": 480, "message": "page 4"},
     "progress_percent": 40.0, "duration_seconds": 12.3,
     "estimated_total_seconds": 30.0}
]"#;

const FINISHED: &str = r#"[
    {"title": "users", "state": "done", "total_count": 2,
     "counters": {"success": 2}, "progress_percent": 100.0,
     "finished_at": "2024-06-12T14:03:07+02:00"},
    {"title": "groups", "state": "finished", "total_count": 1200,
     "counters": {"success": 1200}, "progress_percent": 100.0}
]"#;

// ============================================================================
// StateFileSource
// ============================================================================

#[test]
fn test_missing_file_is_empty() {
    let dir = state_dir();
    let mut source = StateFileSource::new(dir.path().join("state.json"));

    let snapshots = source.snapshot().unwrap();
    assert!(snapshots.is_empty());
}

#[test]
fn test_empty_file_is_empty() {
    let dir = state_dir();
    let path = dir.path().join("state.json");
    fs::write(&path, "  \n").unwrap();

    assert!(StateFileSource::new(&path).snapshot().unwrap().is_empty());
}

#[test]
fn test_reads_snapshot_with_aliases() {
    let dir = state_dir();
    let path = dir.path().join("state.json");
    fs::write(&path, RUNNING).unwrap();

    let snapshots = StateFileSource::new(&path).snapshot().unwrap();
    let titles: Vec<_> = snapshots.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["users", "groups"]);

    let users = snapshots.get("users").unwrap();
    assert_eq!(users.state, LifecycleState::Queued);
    assert_eq!(users.waiting_on, vec!["groups"]);

    let groups = snapshots.get("groups").unwrap();
    assert_eq!(groups.success(), 480);
    assert_eq!(groups.message(), "page 4");
}

#[test]
fn test_rereads_on_every_snapshot() {
    let dir = state_dir();
    let path = dir.path().join("state.json");
    let mut source = StateFileSource::new(&path);

    fs::write(&path, RUNNING).unwrap();
    assert!(!source.snapshot().unwrap().all_finished());

    fs::write(&path, FINISHED).unwrap();
    assert!(source.snapshot().unwrap().all_finished());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = state_dir();
    let path = dir.path().join("state.json");
    fs::write(&path, r#"[{"title": "users", "state": "exploded"}]"#).unwrap();

    let err = StateFileSource::new(&path).snapshot().unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
    assert!(err.to_string().contains("state.json"));
}

#[test]
fn test_directory_is_read_error() {
    let dir = state_dir();
    let err = StateFileSource::new(dir.path()).snapshot().unwrap_err();
    assert!(matches!(err, SourceError::Read { .. }));
}

// ============================================================================
// Refresh loop over a state file
// ============================================================================

fn config() -> BoardConfig {
    let mut config = BoardConfig::new();
    config.glyphs = GlyphSet::Ascii;
    config.refresh_interval = Duration::from_millis(1);
    config
}

#[test]
fn test_corrupt_rewrite_keeps_last_good_frame() {
    let dir = state_dir();
    let path = dir.path().join("state.json");
    fs::write(&path, RUNNING).unwrap();

    let mut app = App::new(&config(), StateFileSource::new(&path), MemorySink::new());
    assert_eq!(app.refresh().unwrap(), Tick::Continue);

    fs::write(&path, "[{\"title\": ").unwrap();
    assert_eq!(app.refresh().unwrap(), Tick::Continue);

    let frames: Vec<_> = app.sink().frames().collect();
    assert_eq!(frames.len(), 2);
    assert!(frames[1].iter().any(|l| l.contains("Waiting for: groups")));
    assert!(frames[1].iter().any(|l| l.contains("page 4")));
}

#[test]
fn test_run_finishes_with_finished_file() {
    let dir = state_dir();
    let path = dir.path().join("state.json");
    fs::write(&path, FINISHED).unwrap();

    let mut app = App::new(&config(), StateFileSource::new(&path), MemorySink::new());
    tokio_test::block_on(app.run_until(std::future::pending())).unwrap();

    let sink = app.into_sink();
    assert_eq!(
        sink.lines().collect::<Vec<_>>(),
        vec!["Starting import ...", ""]
    );

    let frame = sink.last_frame().unwrap();
    assert!(frame.iter().any(|l| l.contains("[+] users")));
    assert!(frame.iter().any(|l| l.contains("1,200")));
}
