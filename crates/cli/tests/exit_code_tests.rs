//! Integration tests for structured exit codes and error output.
//!
//! These tests verify that rejected options exit with code 5 and print the
//! classification code as JSON on stderr, enabling reliable shell scripting.

mod common;

use common::optschema_cmd;
use serde_json::Value;

fn stderr_code(output: &std::process::Output) -> String {
    let report: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    report["code"].as_str().unwrap_or_default().to_string()
}

#[test]
fn test_success_returns_exit_code_0() {
    optschema_cmd().assert().code(0);
}

#[test]
fn test_type_error_returns_exit_code_5() {
    let output = optschema_cmd()
        .arg(r#"{"port": "25"}"#)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr_code(&output), "/server/options/type");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_node_env_returns_enum() {
    let output = optschema_cmd().env("NODE_ENV", "abc").output().unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr_code(&output), "/server/options/enum");
}

#[test]
fn test_env_as_argument_returns_noarg() {
    let output = optschema_cmd()
        .arg(r#"{"env": "development"}"#)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr_code(&output), "/server/options/noarg");
}

#[test]
fn test_bare_value_without_root_returns_notobject() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("schema.json");
    std::fs::write(&path, "{}").unwrap();

    let output = optschema_cmd()
        .arg("--schema")
        .arg(&path)
        .arg("hello")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr_code(&output), "/server/options/notobject");
}
