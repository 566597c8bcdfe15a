//! CLI integration tests

use std::process::{Command, Output};

fn salary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_salary"))
        .args(args)
        .env_remove("SALARY_API_URL")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = salary(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Salary Estimator"), "Should show app name");
    assert!(stdout.contains("jobs"), "Should show jobs command");
    assert!(stdout.contains("predict"), "Should show predict command");
    assert!(stdout.contains("insights"), "Should show insights command");
    assert!(stdout.contains("health"), "Should show health command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = salary(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("salary"), "Should show binary name");
}

/// Test predict subcommand help
#[test]
fn test_predict_help() {
    let output = salary(&["predict", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Predict help should succeed");
    assert!(stdout.contains("--experience"), "Should show experience option");
    assert!(stdout.contains("--education"), "Should show education option");
    assert!(stdout.contains("--job"), "Should show job option");
}

/// Test insights subcommand help
#[test]
fn test_insights_help() {
    let output = salary(&["insights", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Insights help should succeed");
    assert!(stdout.contains("--salary"), "Should show salary option");
    assert!(stdout.contains("--education"), "Should show education option");
}

/// Test format and api-url options
#[test]
fn test_global_options() {
    let output = salary(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(stdout.contains("SALARY_API_URL"), "Should show env var");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = salary(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should show error message");
}

/// Test missing required argument error handling
#[test]
fn test_predict_missing_argument() {
    let output = salary(&["predict", "--job", "Data Analyst"]);
    assert!(!output.status.success(), "Missing argument should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required"), "Should name the missing argument");
}

/// Insights needs either a salary or an education level to predict one
#[test]
fn test_insights_requires_salary_or_education() {
    let output = salary(&["insights", "--job", "Data Analyst", "--experience", "3"]);
    assert!(!output.status.success(), "Insights without salary should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--education"), "Should ask for education");
}

/// Test non-numeric experience is rejected by the parser
#[test]
fn test_predict_rejects_non_numeric_experience() {
    let output = salary(&[
        "predict",
        "--experience",
        "lots",
        "--education",
        "PhD",
        "--job",
        "Data Analyst",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "Should report invalid value");
}

/// Test an unreachable server produces an error exit code
#[test]
fn test_unreachable_server_fails() {
    let output = salary(&["--api-url", "http://127.0.0.1:1", "jobs"]);
    assert!(!output.status.success(), "Unreachable server should fail");
}
