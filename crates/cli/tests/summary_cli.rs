mod common;

use std::fs;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use common::{result_document, write_result};

#[test]
fn summarizes_a_single_run() {
    let dir = tempdir().expect("tempdir");
    write_result(dir.path(), "vstd", &result_document("vstd", 812, 45210, &[("lemma_len", 120), ("lemma_get", 35)]));
    write_result(dir.path(), "anvil", &result_document("anvil", 40, 1500, &[]));

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Project Summary ===\n"))
        .stdout(predicate::str::contains("vstd     OK           812       0     45.21 s"))
        .stdout(predicate::str::contains(
            "Total: 2 projects (2 OK, 0 FAILED, 0 ERROR), 852 verified, 0 errors",
        ))
        .stdout(predicate::str::contains("--- vstd ---\n  1.  120 ms   lemma_len\n  2.   35 ms   lemma_get\n"))
        .stdout(predicate::str::contains("--- anvil ---\n  (no timing data available)\n"));
}

#[test]
fn empty_directory_is_reported_not_rendered() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("notes.txt"), "not a result").expect("write notes");

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No JSON files found in "))
        .stdout(predicate::str::contains("Project Summary").not());
}

#[test]
fn compares_two_runs() {
    let old = tempdir().expect("old dir");
    let new = tempdir().expect("new dir");
    write_result(old.path(), "vstd", &result_document("vstd", 10, 2000, &[("a", 100), ("b", 90)]));
    write_result(old.path(), "gone", &result_document("gone", 1, 100, &[]));
    write_result(new.path(), "vstd", &result_document("vstd", 7, 3000, &[("b", 95), ("c", 80)]));
    write_result(new.path(), "fresh", &result_document("fresh", 2, 100, &[]));

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(old.path())
        .arg(new.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Project Summary (old → new) ===\n"))
        .stdout(predicate::str::contains("10 → 7 (-3)"))
        .stdout(predicate::str::contains("2.00 → 3.00 s (+1.00 s, +50.0%)"))
        .stdout(predicate::str::contains("(new)"))
        .stdout(predicate::str::contains("(removed)"))
        .stdout(predicate::str::contains("Total: 2 → 2 projects, verified 11 → 9 (-2), errors 0 → 0 (+0)"))
        .stdout(predicate::str::contains("  b          90 ms   95 ms  +5 ms (+5.6%)"));
}

#[test]
fn comparison_with_both_directories_empty() {
    let old = tempdir().expect("old dir");
    let new = tempdir().expect("new dir");

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(old.path())
        .arg(new.path())
        .assert()
        .success()
        .stdout("No JSON files found in either directory\n");
}

#[test]
fn comparison_against_an_empty_directory_marks_everything_new() {
    let old = tempdir().expect("old dir");
    let new = tempdir().expect("new dir");
    write_result(new.path(), "vstd", &result_document("vstd", 3, 100, &[]));

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(old.path())
        .arg(new.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(new)"))
        .stderr(predicate::str::contains("old results directory is empty"));
}

#[test]
fn rejects_wrong_directory_counts() {
    assert_cmd::cargo::cargo_bin_cmd!("verita-summary").assert().failure();

    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .args([dir.path(), dir.path(), dir.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected 1 or 2 directories"));
}

#[test]
fn malformed_result_file_fails_with_its_path() {
    let dir = tempdir().expect("tempdir");
    write_result(dir.path(), "good", &result_document("good", 1, 10, &[]));
    fs::write(dir.path().join("broken.json"), "{ not json").expect("write broken");

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn missing_directory_fails() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load results"));
}

#[test]
fn json_output_carries_records_and_totals() {
    let dir = tempdir().expect("tempdir");
    write_result(dir.path(), "vstd", &result_document("vstd", 812, 45210, &[("lemma_len", 120)]));

    let output = assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg("--json")
        .arg(dir.path())
        .output()
        .expect("run verita-summary");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["totals"]["projects"], 1);
    assert_eq!(value["totals"]["verified"], 812);
    assert_eq!(value["run"]["records"]["vstd"]["status"], "ok");
    assert_eq!(value["run"]["records"]["vstd"]["functions"][0]["name"], "lemma_len");
}

#[test]
fn comparison_json_tags_presence() {
    let old = tempdir().expect("old dir");
    let new = tempdir().expect("new dir");
    write_result(old.path(), "vstd", &result_document("vstd", 1, 10, &[]));
    write_result(new.path(), "vstd", &result_document("vstd", 2, 20, &[]));
    write_result(new.path(), "fresh", &result_document("fresh", 2, 20, &[]));

    let output = assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg("--json")
        .arg(old.path())
        .arg(new.path())
        .output()
        .expect("run verita-summary");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let presence: Vec<&str> = value["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .map(|e| e["presence"].as_str().expect("presence tag"))
        .collect();
    assert_eq!(presence, ["new", "both"]);
    assert_eq!(value["new_totals"]["projects"], 2);
}

#[test]
fn top_flag_limits_the_function_list() {
    let dir = tempdir().expect("tempdir");
    write_result(dir.path(), "p", &result_document("p", 1, 10, &[("f1", 1), ("f2", 2), ("f3", 3)]));

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .args(["--top", "1"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Top 1 Slowest Functions ==="))
        .stdout(predicate::str::contains("f3"))
        .stdout(predicate::str::contains("f2").not());
}

#[test]
fn config_file_sets_top_functions_and_top_flag_overrides_it() {
    let dir = tempdir().expect("tempdir");
    write_result(dir.path(), "p", &result_document("p", 1, 10, &[("f1", 1), ("f2", 2), ("f3", 3)]));
    let config_dir = tempdir().expect("config dir");
    let config = config_dir.path().join("report.yaml");
    fs::write(&config, "top_functions: 2\n").expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg("--config")
        .arg(&config)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Top 2 Slowest Functions ==="))
        .stdout(predicate::str::contains("f2"))
        .stdout(predicate::str::contains("f1").not());

    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .arg("--config")
        .arg(&config)
        .args(["--top", "3"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("f1"));
}

#[test]
fn zero_top_is_rejected() {
    let dir = tempdir().expect("tempdir");
    assert_cmd::cargo::cargo_bin_cmd!("verita-summary")
        .args(["--top", "0"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("top_functions must be at least 1"));
}
