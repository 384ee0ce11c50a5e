//! CLI smoke tests for envbind.
//!
//! Each test runs the binary with an explicit environment so the host's
//! `ENVBIND_*` variables never leak in.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const VARS: [&str; 7] = [
  "ENVBIND_HOST",
  "ENVBIND_PORT",
  "ENVBIND_DEBUG",
  "ENVBIND_SAMPLE_RATIO",
  "ENVBIND_TAGS",
  "ENVBIND_DATABASE_URL",
  "ENVBIND_DATABASE_POOL_SIZE",
];

/// Get a Command for the envbind binary with all demo variables cleared.
fn envbind_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("envbind");
  for var in VARS {
    cmd.env_remove(var);
  }
  cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  envbind_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  envbind_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// show
// =============================================================================

#[test]
fn show_uses_defaults() {
  envbind_cmd()
    .arg("show")
    .assert()
    .success()
    .stdout(predicate::str::contains("127.0.0.1"))
    .stdout(predicate::str::contains("8080"))
    .stdout(predicate::str::contains("postgres://localhost/envbind"));
}

#[test]
fn show_json_reflects_environment() {
  let output = envbind_cmd()
    .args(["show", "--output", "json"])
    .env("ENVBIND_PORT", "9090")
    .env("ENVBIND_TAGS", "a,b")
    .env("ENVBIND_DATABASE_POOL_SIZE", "16")
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["port"], 9090);
  assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
  assert_eq!(json["database"]["pool_size"], 16);
  assert_eq!(json["host"], "127.0.0.1");
}

#[test]
fn show_fails_on_unparsable_value() {
  envbind_cmd()
    .arg("show")
    .env("ENVBIND_DATABASE_POOL_SIZE", "lots")
    .assert()
    .failure()
    .stderr(predicate::str::contains("database.pool_size"))
    .stderr(predicate::str::contains("lots"));
}

// =============================================================================
// vars
// =============================================================================

#[test]
fn vars_lists_every_variable() {
  let mut assert = envbind_cmd().arg("vars").assert().success();
  for var in VARS {
    assert = assert.stdout(predicate::str::contains(var));
  }
}

#[test]
fn vars_json_includes_kinds() {
  let output = envbind_cmd().args(["vars", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let fields = json.as_array().unwrap();
  assert_eq!(fields.len(), VARS.len());

  let tags = fields.iter().find(|f| f["var"] == "ENVBIND_TAGS").unwrap();
  assert_eq!(tags["path"], "tags");
  assert_eq!(tags["kind"], serde_json::json!({ "list": "text" }));
  assert!(tags["default"].is_null());
}

// =============================================================================
// watch
// =============================================================================

#[test]
fn unknown_output_format_is_rejected() {
  envbind_cmd()
    .args(["show", "--output", "yaml"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("yaml"));
}

#[test]
fn watch_rejects_zero_interval() {
  envbind_cmd()
    .args(["watch", "--interval", "0"])
    .assert()
    .failure();
}

#[test]
fn watch_fails_fast_when_initial_bind_fails() {
  envbind_cmd()
    .arg("watch")
    .env("ENVBIND_PORT", "not-a-port")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Initial bind failed"));
}
