//! End-to-end tests for the ndp-pipeline binary
//!
//! These run the offline `process` subcommand against files on disk and
//! validate CLI failure reporting.

use assert_cmd::Command;
use predicates::prelude::*;

const RAW_CSV: &str = "\
title,type,genres,releaseYear,imdbAverageRating,imdbNumVotes,imdbId,availableCountries
Show A,Movie,\"Drama, Thriller\",2020,7.5,1000,tt001,US
Show B,Series,,2019,6.1,500,tt002,CA
Show C,Movie,Action,N/A,5.0,100,tt003,US
";

fn pipeline_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ndp-pipeline").unwrap();
    // keep host configuration out of the test environment
    cmd.env_remove("KAGGLE_USERNAME")
        .env_remove("KAGGLE_KEY")
        .env_remove("NDP_DATASET")
        .env_remove("NDP_DATA_DIR")
        .env_remove("NDP_RAW_FILENAME")
        .env_remove("NDP_OUTPUT_FILENAME")
        .env_remove("NDP_API_BASE_URL")
        .env_remove("NDP_TIMEOUT_SECS");
    cmd
}

// ============================================================================
// Process Subcommand
// ============================================================================

#[test]
fn test_process_writes_transformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, RAW_CSV).unwrap();

    pipeline_cmd()
        .current_dir(dir.path())
        .arg("process")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Title,Type,Year,Rating,Votes,Genre",
            "Show A,Movie,2020,7.5,1000,Drama",
            "Show B,Series,2019,6.1,500,Unknown",
        ]
    );
}

#[test]
fn test_process_reports_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(&input, "title,type\nShow A,Movie\n").unwrap();

    pipeline_cmd()
        .current_dir(dir.path())
        .arg("process")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"))
        .stderr(predicate::str::contains("releaseYear"));
}

#[test]
fn test_process_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();

    pipeline_cmd()
        .current_dir(dir.path())
        .arg("process")
        .arg("--input")
        .arg(dir.path().join("nope.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

// ============================================================================
// Credential Preflight
// ============================================================================

#[test]
fn test_run_requires_credentials_before_any_network_call() {
    let dir = tempfile::tempdir().unwrap();

    // point at a closed port; the preflight check must fail first
    pipeline_cmd()
        .current_dir(dir.path())
        .env("NDP_API_BASE_URL", "http://127.0.0.1:1")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("KAGGLE_USERNAME"))
        .stderr(predicate::str::contains("KAGGLE_KEY"));
}

#[test]
fn test_fetch_requires_credentials() {
    let dir = tempfile::tempdir().unwrap();

    pipeline_cmd()
        .current_dir(dir.path())
        .env("NDP_API_BASE_URL", "http://127.0.0.1:1")
        .env("KAGGLE_USERNAME", "user")
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("KAGGLE_KEY"));
}
