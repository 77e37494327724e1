use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const CSV: &str = "id,state,abbr,poverty,age,income,healthcare,obesity,smokes\n\
                   1,Alabama,AL,19.3,38.6,42830,13.9,33.5,21.1\n\
                   2,Alaska,AK,11.2,33.3,71583,15,29.7,19.9\n";

fn write_data(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("popData.csv");
    fs::write(&path, CSV).unwrap();
    path
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("statescatter").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("tooltip"));
}

#[test]
fn render_writes_svg_rows_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(&dir);
    let out = dir.path().join("chart.svg");
    let rows = dir.path().join("rows.json");

    let mut cmd = Command::cargo_bin("statescatter").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .args(["--x", "age", "--y", "smokes", "--stats", "--locale", "de"])
        .arg("--out")
        .arg(&out)
        .arg("--export")
        .arg(&rows);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("income"))
        .stdout(predicate::str::contains("count=2"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Age (Median)"));
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&rows).unwrap()).unwrap();
    assert_eq!(v[0]["x_field"], "age");
    assert_eq!(v[0]["y_field"], "smokes");
}

#[test]
fn tooltip_prints_bound_fields() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_data(&dir);

    let mut cmd = Command::cargo_bin("statescatter").unwrap();
    cmd.arg("tooltip")
        .arg("--data")
        .arg(&data)
        .args(["--state", "ak", "--x", "income", "--y", "obesity"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Alaska"))
        .stdout(predicate::str::contains("Household Income (Median): 71583"))
        .stdout(predicate::str::contains("Obese (%): 29.7"));
}

#[test]
fn rejects_field_on_wrong_axis() {
    let mut cmd = Command::cargo_bin("statescatter").unwrap();
    cmd.args(["tooltip", "--state", "AL", "--x", "healthcare"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("statescatter").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(dir.path().join("absent.csv"))
        .arg("--out")
        .arg(dir.path().join("chart.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
