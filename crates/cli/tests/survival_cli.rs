mod common;

use std::fs;

use predicates::prelude::*;
use tempfile::tempdir;

use common::{result_document, write_result};

#[test]
fn prints_csv_for_each_directory() {
    let root = tempdir().expect("tempdir");
    let baseline = root.path().join("baseline");
    let tuned = root.path().join("tuned");
    fs::create_dir_all(&baseline).expect("baseline dir");
    fs::create_dir_all(&tuned).expect("tuned dir");
    write_result(&baseline, "p", &result_document("p", 2, 10, &[("f", 30), ("g", 10)]));
    write_result(&tuned, "p", &result_document("p", 2, 10, &[("f", 5)]));

    assert_cmd::cargo::cargo_bin_cmd!("verita-survival")
        .arg(&baseline)
        .arg(&tuned)
        .assert()
        .success()
        .stdout("series,time_ms,solved\nbaseline,10,1\nbaseline,30,2\ntuned,5,1\n");
}

#[test]
fn writes_csv_to_output_file() {
    let root = tempdir().expect("tempdir");
    let run = root.path().join("run");
    fs::create_dir_all(&run).expect("run dir");
    write_result(&run, "p", &result_document("p", 1, 10, &[("f", 7)]));
    let output = root.path().join("survival.csv");

    assert_cmd::cargo::cargo_bin_cmd!("verita-survival")
        .arg(&run)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote survival data:"));

    let csv = fs::read_to_string(&output).expect("read csv");
    assert_eq!(csv, "series,time_ms,solved\nrun,7,1\n");
}

#[test]
fn empty_directories_are_skipped() {
    let root = tempdir().expect("tempdir");
    let empty = root.path().join("empty");
    fs::create_dir_all(&empty).expect("empty dir");

    assert_cmd::cargo::cargo_bin_cmd!("verita-survival")
        .arg(&empty)
        .assert()
        .success()
        .stdout("series,time_ms,solved\n")
        .stderr(predicate::str::contains("skipping survival series"));
}
