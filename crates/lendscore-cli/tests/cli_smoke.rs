//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `lendscore` binary to verify that
//! argument parsing, error handling, and the train/predict flows work
//! end-to-end.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("lendscore").unwrap()
}

fn write_training_csv(path: &Path) {
    let mut csv = String::from(
        "Loan_ID,Gender,Married,Dependents,Education,Self_Employed,ApplicantIncome,\
         CoapplicantIncome,LoanAmount,Loan_Amount_Term,Credit_History,Property_Area,Loan_Status\n",
    );
    for i in 0..12 {
        let jitter = (i * 50) as f32;
        writeln!(
            csv,
            "LP{:03},Male,Yes,0,Graduate,No,{},1500,120,360,1,Urban,Y",
            2 * i,
            6000.0 + jitter
        )
        .unwrap();
        writeln!(
            csv,
            "LP{:03},Female,No,1,Not Graduate,Yes,{},0,200,360,0,Rural,N",
            2 * i + 1,
            2000.0 + jitter
        )
        .unwrap();
    }
    fs::write(path, csv).unwrap();
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("predict"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lendscore"));
}

// ---------------------------------------------------------------------------
// Train subcommand
// ---------------------------------------------------------------------------

#[test]
fn train_no_config_prints_template() {
    cmd()
        .arg("train")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"train_data\""))
        .stdout(predicate::str::contains("\"output_file\""))
        .stderr(predicate::str::contains("No config file provided"));
}

#[test]
fn train_nonexistent_config_errors() {
    cmd()
        .args(["train", "/nonexistent/config.json"])
        .assert()
        .failure();
}

#[test]
fn train_nonexistent_data_errors() {
    cmd()
        .args(["train", "--train_data", "/nonexistent/applications.csv"])
        .assert()
        .failure();
}

#[test]
fn train_rejects_non_csv_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("applications.txt");
    fs::write(&path, "not a csv").unwrap();
    cmd()
        .args(["train", "--train_data", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".csv"));
}

// ---------------------------------------------------------------------------
// Predict subcommand
// ---------------------------------------------------------------------------

#[test]
fn predict_without_model_points_at_train() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("loan_model.json");
    cmd()
        .args(["predict", "--model", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no trained model artifact"));
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn train_then_predict_from_json_record() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("applications.csv");
    let model_path = dir.path().join("loan_model.json");
    write_training_csv(&data_path);

    cmd()
        .args([
            "train",
            "--train_data",
            data_path.to_str().unwrap(),
            "--output_file",
            model_path.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert!(model_path.exists());

    let record_path = dir.path().join("applicant.json");
    fs::write(
        &record_path,
        r#"{
            "Gender": "Male",
            "Married": "Yes",
            "Dependents": "0",
            "Education": "Graduate",
            "Self_Employed": "No",
            "ApplicantIncome": 6000.0,
            "CoapplicantIncome": 1500.0,
            "LoanAmount": 120.0,
            "Loan_Amount_Term": 360.0,
            "Credit_History": 1.0,
            "Property_Area": "Urban"
        }"#,
    )
    .unwrap();

    cmd()
        .args([
            "predict",
            "--model",
            model_path.to_str().unwrap(),
            "--input",
            record_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approved"));
}

#[test]
fn train_then_predict_interactively() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("applications.csv");
    let model_path = dir.path().join("loan_model.json");
    write_training_csv(&data_path);

    cmd()
        .args([
            "train",
            "--train_data",
            data_path.to_str().unwrap(),
            "--output_file",
            model_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    cmd()
        .args(["predict", "--model", model_path.to_str().unwrap()])
        .write_stdin("Female\nNo\n1\nNot Graduate\nYes\n2000\n0\n200\n\n0\nRural\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rejected"));
}
