//! CLI integration tests
//!
//! Drives the `daxc` binary against temporary source and config files.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Path to the compiled daxc binary (resolved at compile time)
fn daxc_bin() -> String {
    env!("CARGO_BIN_EXE_daxc").to_string()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path.display().to_string()
}

// ── daxc convert ────────────────────────────────────────────────────────

#[test]
fn test_convert_sql_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "query.sql",
        "SELECT SUM(amount) AS total FROM Sales WHERE region = 'West'",
    );

    let output = Command::new(daxc_bin())
        .args(["convert", "--dialect", "sql", &input])
        .output()
        .expect("Failed to run daxc convert");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "convert should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout.trim(),
        "total = SUM(Sales[amount], FILTER(Sales, Sales[region] = 'West'))"
    );
}

#[test]
fn test_convert_json_output() {
    let output = Command::new(daxc_bin())
        .args([
            "convert",
            "-d",
            "spotfire",
            "-e",
            "Sum([Sales]) OVER ([Region]) as [Regional Sales]",
            "--output",
            "json",
        ])
        .output()
        .expect("Failed to run daxc convert");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["success"], true);
    assert_eq!(
        json["converted_code"],
        "Regional Sales = SUM(Table[Sales], FILTER(Table, Table[Region] = EARLIER(Table[Region])))"
    );
    assert_eq!(json["objects_identified"]["aliases"][0], "Regional Sales");
    assert!(json["warnings"].as_array().is_some_and(|w| !w.is_empty()));
}

#[test]
fn test_convert_reads_stdin() {
    let mut child = Command::new(daxc_bin())
        .args(["--table", "Orders", "convert", "-d", "spotfire"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn daxc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"Max(\n  [Amount]\n)\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "MAX(Orders[Amount])"
    );
}

#[test]
fn test_convert_empty_source_fails() {
    let output = Command::new(daxc_bin())
        .args(["convert", "-d", "sql", "-e", "   ", "-o", "json"])
        .output()
        .expect("Failed to run daxc convert");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "[C001] Please provide source code to convert");
    assert_eq!(
        json["suggestions"][0],
        "Enter SQL or Spotfire code in the input area"
    );
}

#[test]
fn test_convert_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "daxc.yml", "default_table: Facts\n");

    let output = Command::new(daxc_bin())
        .args(["--config", &config, "convert", "-d", "spotfire", "-e", "[Price] * 2"])
        .output()
        .expect("Failed to run daxc convert");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Facts[Price] * 2"
    );
}

#[test]
fn test_missing_config_is_an_error() {
    let output = Command::new(daxc_bin())
        .args(["--config", "/nonexistent/daxc.yml", "convert", "-d", "sql", "-e", "SELECT a FROM t"])
        .output()
        .expect("Failed to run daxc convert");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E001"), "stderr: {}", stderr);
}

#[test]
fn test_convert_with_sql_dialect() {
    let output = Command::new(daxc_bin())
        .args([
            "--sql-dialect",
            "tsql",
            "convert",
            "-d",
            "sql",
            "-e",
            "SELECT SUM(amount) AS total FROM Sales",
        ])
        .output()
        .expect("Failed to run daxc convert");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "total = SUM(Sales[amount])"
    );
}

#[test]
fn test_unknown_sql_dialect_is_an_error() {
    let output = Command::new(daxc_bin())
        .args(["--sql-dialect", "oracle", "convert", "-d", "sql", "-e", "SELECT a FROM t"])
        .output()
        .expect("Failed to run daxc convert");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[S003]"), "stderr: {}", stderr);
    assert!(stderr.contains("oracle"));
}

// ── daxc validate ───────────────────────────────────────────────────────

#[test]
fn test_validate_valid_source() {
    let output = Command::new(daxc_bin())
        .args(["validate", "-d", "sql", "-e", "SELECT a, b FROM t"])
        .output()
        .expect("Failed to run daxc validate");

    assert!(output.status.success());
}

#[test]
fn test_validate_reports_errors() {
    let output = Command::new(daxc_bin())
        .args(["validate", "-d", "spotfire", "-e", "Sum([x]", "-o", "json"])
        .output()
        .expect("Failed to run daxc validate");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["errors"][0].as_str().unwrap().contains("SF001"));
}

// ── daxc parse / mappings ───────────────────────────────────────────────

#[test]
fn test_parse_prints_unit() {
    let output = Command::new(daxc_bin())
        .args(["parse", "-d", "sql", "-e", "DELETE FROM t WHERE x = 1"])
        .output()
        .expect("Failed to run daxc parse");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["items"][0]["type"], "delete");
}

#[test]
fn test_mappings_listing() {
    let output = Command::new(daxc_bin())
        .args(["mappings", "--dialect", "spotfire", "--kind", "functions"])
        .output()
        .expect("Failed to run daxc mappings");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout
        .lines()
        .any(|line| line.starts_with("countdistinct") && line.ends_with("DISTINCTCOUNT")));
}
