//! Integration tests for the piisift CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn piisift() -> Command {
    let mut cmd = Command::cargo_bin("piisift").unwrap();
    cmd.env_remove("PIISIFT_CONFIG");
    cmd
}

#[test]
fn test_detect_patterns_only() {
    let mut cmd = piisift();
    cmd.arg("detect").arg("-i").arg(fixture_path("cv-sample.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("jan.jansen@example.nl"))
        .stdout(predicate::str::contains("emails: jan.jansen@example.nl"))
        .stdout(predicate::str::contains("phones: 06-12345678"))
        .stdout(predicate::str::contains("Jan Jansen").not());
}

#[test]
fn test_anonymize_with_lexicon() {
    let mut cmd = piisift();
    cmd.arg("anonymize")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-c")
        .arg(fixture_path("lexicon.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[NAME]\n[ADDRESS], [POSTALCODE] [REDACTED]\n",
        ))
        .stdout(predicate::str::contains("Email: [EMAIL]"))
        .stdout(predicate::str::contains("Tel: [PHONE]"))
        .stdout(predicate::str::contains("Google").not());
}

#[test]
fn test_detect_json_output() {
    let output = piisift()
        .arg("detect")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-c")
        .arg(fixture_path("lexicon.toml"))
        .arg("-f")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entry = &json[0];
    assert!(entry["file"].as_str().unwrap().ends_with("cv-sample.txt"));
    assert_eq!(entry["entity_count"], 8);
    assert_eq!(entry["entities"][0]["label"], "person");
    assert_eq!(entry["entities"][0]["start"], 0);
    assert_eq!(entry["entities"][0]["end"], 10);
    assert_eq!(entry["categorized"]["names"][0], "Jan Jansen");
}

#[test]
fn test_no_categorize() {
    let output = piisift()
        .arg("detect")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-f")
        .arg("json")
        .arg("--no-categorize")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json[0].get("categorized").is_none());
}

#[test]
fn test_threshold_override() {
    let output = piisift()
        .arg("detect")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-c")
        .arg(fixture_path("lexicon.toml"))
        .arg("-t")
        .arg("0.95")
        .arg("-f")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["entity_count"], 3);
}

#[test]
fn test_invalid_threshold() {
    let mut cmd = piisift();
    cmd.arg("detect")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-t")
        .arg("1.5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("anonymized.txt");

    let mut cmd = piisift();
    cmd.arg("anonymize")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-o")
        .arg(&output_file);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("Email: [EMAIL]"));
    assert!(content.contains("Jan Jansen"));
}

#[test]
fn test_multiple_files_parallel() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "Mail a@example.nl").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "Bel 0612345678").unwrap();
    fs::write(temp_dir.path().join("c.txt"), "  \n").unwrap();

    let mut cmd = piisift();
    cmd.arg("anonymize")
        .arg("-i")
        .arg(temp_dir.path().join("*.txt"))
        .arg("--parallel")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("a.txt <==\nMail [EMAIL]\n"))
        .stdout(predicate::str::contains("b.txt <==\nBel [PHONE]\n"))
        .stdout(predicate::str::contains("c.txt").not());
}

#[test]
fn test_no_matching_files() {
    let mut cmd = piisift();
    cmd.arg("detect").arg("-i").arg("nonexistent/*.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_list_commands() {
    piisift()
        .args(["list", "labels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("organization"))
        .stdout(predicate::str::contains("postalcode"));

    piisift()
        .args(["list", "placeholders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[POSTALCODE]"));

    piisift()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("json"));
}

#[test]
fn test_generated_config_is_usable() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("piisift.toml");

    piisift()
        .arg("generate-config")
        .arg("-o")
        .arg(&config_path)
        .assert()
        .success();

    piisift()
        .arg("anonymize")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"))
        .arg("-c")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[POSTALCODE]"));
}

#[test]
fn test_config_from_env() {
    let mut cmd = Command::cargo_bin("piisift").unwrap();
    cmd.env("PIISIFT_CONFIG", fixture_path("lexicon.toml"))
        .arg("anonymize")
        .arg("-i")
        .arg(fixture_path("cv-sample.txt"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("[NAME]"));
}
