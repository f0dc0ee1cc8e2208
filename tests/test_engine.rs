//! Integration tests for engine invocation.
//!
//! The engine binary is stood in for by small shell scripts, which is
//! enough to exercise argument passing, exit-status checking, and the
//! timeout path.

#![cfg(unix)]

use relab::{Engine, RelabError};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Write an executable shell script standing in for the engine binary.
fn mock_engine(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("engine.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn test_clean_exit() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(mock_engine(&dir, "exit 0"));
    engine.run(dir.path(), 42, 1000).unwrap();
}

#[test]
fn test_arguments_are_passed_positionally() {
    let dir = TempDir::new().unwrap();
    let argfile = dir.path().join("args.txt");
    let engine = Engine::new(mock_engine(
        &dir,
        &format!("echo \"$1 $2 $3\" > {}", argfile.display()),
    ));

    engine.run(dir.path(), 42, -7).unwrap();

    let recorded = std::fs::read_to_string(&argfile).unwrap();
    let expected = format!("{} 42 -7\n", dir.path().display());
    assert_eq!(recorded, expected);
}

#[test]
fn test_negative_steps_pass_through() {
    // replay mode: the harness must not reinterpret the sign
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(mock_engine(
        &dir,
        "case \"$3\" in -*) exit 0;; *) exit 1;; esac",
    ));
    engine.run(dir.path(), 0, -500).unwrap();
}

#[test]
fn test_nonzero_exit_is_process_failure() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(mock_engine(&dir, "exit 3"));

    let err = engine.run(dir.path(), 1, 100).unwrap_err();
    match err {
        RelabError::Process { reason } => assert!(reason.contains("status 3"), "{}", reason),
        other => panic!("expected Process, got {:?}", other),
    }
}

#[test]
fn test_unlaunchable_binary_is_process_failure() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(dir.path().join("no-such-engine"));
    let err = engine.run(dir.path(), 1, 100).unwrap_err();
    assert!(matches!(err, RelabError::Process { .. }));
}

#[test]
fn test_timeout_kills_hung_engine() {
    let dir = TempDir::new().unwrap();
    let engine =
        Engine::new(mock_engine(&dir, "sleep 30")).with_timeout(Duration::from_millis(200));

    let start = std::time::Instant::now();
    let err = engine.run(dir.path(), 1, 100).unwrap_err();
    assert!(start.elapsed() < Duration::from_secs(5));
    match err {
        RelabError::Process { reason } => assert!(reason.contains("timed out"), "{}", reason),
        other => panic!("expected Process, got {:?}", other),
    }
}

#[test]
fn test_timeout_not_triggered_by_fast_engine() {
    let dir = TempDir::new().unwrap();
    let engine = Engine::new(mock_engine(&dir, "exit 0")).with_timeout(Duration::from_secs(10));
    engine.run(dir.path(), 1, 100).unwrap();
}
