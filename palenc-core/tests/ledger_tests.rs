// palenc-core/tests/ledger_tests.rs

use palenc_core::ledger::ProcessedLedger;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_record_then_contains() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ledger_path = dir.path().join("processed_files.txt");

    let mut ledger = ProcessedLedger::load(&ledger_path)?;
    assert!(ledger.is_empty());
    assert!(!ledger.contains("movie.mkv"));

    ledger.record("movie.mkv")?;
    assert!(ledger.contains("movie.mkv"));
    assert_eq!(ledger.len(), 1);

    dir.close()?;
    Ok(())
}

#[test]
fn test_survives_reload() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ledger_path = dir.path().join("processed_files.txt");

    {
        let mut ledger = ProcessedLedger::load(&ledger_path)?;
        ledger.record("first.mkv")?;
        ledger.record("second.vob")?;
    }

    // Simulated process restart: a fresh load sees the recorded entries.
    let ledger = ProcessedLedger::load(&ledger_path)?;
    assert!(ledger.contains("first.mkv"));
    assert!(ledger.contains("second.vob"));
    assert!(!ledger.contains("third.mkv"));

    dir.close()?;
    Ok(())
}

#[test]
fn test_missing_file_is_empty_ledger() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ledger = ProcessedLedger::load(&dir.path().join("never_written.txt"))?;
    assert!(ledger.is_empty());
    dir.close()?;
    Ok(())
}

#[test]
fn test_record_is_append_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ledger_path = dir.path().join("processed_files.txt");

    let mut ledger = ProcessedLedger::load(&ledger_path)?;
    ledger.record("a.mkv")?;
    ledger.record("b.mkv")?;

    let contents = fs::read_to_string(&ledger_path)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["a.mkv", "b.mkv"]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_creates_missing_parent_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ledger_path = dir.path().join("state").join("processed_files.txt");

    let mut ledger = ProcessedLedger::load(&ledger_path)?;
    ledger.record("movie.mkv")?;

    assert!(ledger_path.is_file());
    dir.close()?;
    Ok(())
}

#[test]
fn test_blank_lines_are_ignored_on_load() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let ledger_path = dir.path().join("processed_files.txt");
    fs::write(&ledger_path, "a.mkv\n\n  \nb.mkv\n")?;

    let ledger = ProcessedLedger::load(&ledger_path)?;
    assert_eq!(ledger.len(), 2);
    assert!(ledger.contains("a.mkv"));
    assert!(ledger.contains("b.mkv"));

    dir.close()?;
    Ok(())
}
