//! Integration tests for the `env2conf` CLI binary.
//!
//! Each test clears the environment and sets only the variables it needs, so
//! the output depends on nothing but the test itself.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: the binary with an empty environment plus `vars`.
fn env2conf(vars: &[(&str, &str)]) -> Command {
    let mut cmd = Command::cargo_bin("env2conf").unwrap();
    cmd.env_clear();
    for (k, v) in vars {
        cmd.env(k, v);
    }
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Output formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_is_the_default() {
    env2conf(&[("config.a", "1")])
        .assert()
        .success()
        .stdout("{\n  \"config\": {\n    \"a\": 1\n  }\n}\n");
}

#[test]
fn json_output_parses_back() {
    let output = env2conf(&[
        ("config.users[0].name", "alice"),
        ("config.users[1].name", "bob"),
        ("config.debug", "true"),
    ])
    .output()
    .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "config": {"users": [{"name": "alice"}, {"name": "bob"}], "debug": true}
        })
    );
}

#[test]
fn toml_output_uses_array_of_tables() {
    env2conf(&[("config.items[0].name", "a"), ("config.items[1].name", "b")])
        .args(["--output", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[[config.items]]"))
        .stdout(predicate::str::contains("name = \"a\""));
}

#[test]
fn yaml_output_starts_with_document_marker() {
    env2conf(&[("config.name", "svc")])
        .args(["-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\n"))
        .stdout(predicate::str::contains("name: svc"));
}

#[test]
fn yml_is_accepted_as_yaml() {
    env2conf(&[("config.name", "svc")])
        .args(["-o", "yml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\n"));
}

#[test]
fn unknown_format_is_rejected() {
    env2conf(&[("config.a", "1")])
        .args(["-o", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Prefix selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn only_prefixed_variables_are_used() {
    env2conf(&[("app.name", "svc"), ("db.host", "h"), ("other", "x")])
        .args(["--prefix", "app,db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"app\""))
        .stdout(predicate::str::contains("\"db\""))
        .stdout(predicate::str::contains("other").not());
}

#[test]
fn no_matching_variables_prints_empty_object() {
    env2conf(&[("HOME", "/root")])
        .assert()
        .success()
        .stdout("{}\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicting_keys_fail() {
    env2conf(&[("config.a", "1"), ("config.a.b", "2")])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("expected map"));
}

#[test]
fn huge_index_fails_cleanly() {
    env2conf(&[("config.a[99999999999]", "1")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the limit"));
}

#[test]
fn empty_container_then_contents() {
    env2conf(&[("config.a", "{}"), ("config.a.b", "1")])
        .assert()
        .success()
        .stdout("{\n  \"config\": {\n    \"a\": {\n      \"b\": 1\n    }\n  }\n}\n");
}

#[test]
fn non_numeric_index_fails() {
    env2conf(&[("config.a[x]", "1")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-number"));
}

#[test]
fn mixed_array_fails_only_in_toml() {
    let vars = [("config.a[0]", "x"), ("config.a[1]", "1")];

    env2conf(&vars)
        .args(["-o", "toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mixed data types"));

    env2conf(&vars).assert().success();
}

#[test]
fn null_fails_in_toml() {
    env2conf(&[("config.a", "null")])
        .args(["-o", "toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no null"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Flags
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn version_flag() {
    env2conf(&[])
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("env2conf"));
}

#[test]
fn debug_logging_goes_to_stderr() {
    env2conf(&[("config.a", "1"), ("ENV2CONF_LOG", "debug")])
        .assert()
        .success()
        .stdout("{\n  \"config\": {\n    \"a\": 1\n  }\n}\n")
        .stderr(predicate::str::contains("building document"));
}
