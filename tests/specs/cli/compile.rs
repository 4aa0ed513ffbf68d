// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `bzq compile` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use similar_asserts::assert_eq;
use tempfile::TempDir;
use yare::parameterized;

/// A scratch directory holding a config file, so the user's own config never
/// leaks into a run.
struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn bzq(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("bzq");
        cmd.arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .env_remove("BZQ_LOG");
        cmd
    }

    fn compile(&self, args: &[&str]) -> Value {
        let output = self.bzq().arg("compile").args(args).output().unwrap();
        assert!(
            output.status.success(),
            "compile failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

// =============================================================================
// Phase 1: Plain Backends
// =============================================================================

#[test]
fn generic_v3_direct_fields() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&[
        "--backend",
        "bugzilla3",
        "--opt",
        "product=foo",
        "--opt",
        "bug_id=1234,2480",
        "--opt",
        "version=12",
    ]);
    assert_eq!(
        payload,
        json!({
            "product": ["foo"],
            "id": ["1234", "2480"],
            "version": "12",
            "include_fields": ["bug_id", "bug_status", "assigned_to", "short_desc"],
        })
    );
}

#[test]
fn generic_v4_status_alias_and_emails() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&[
        "-b",
        "bz4",
        "-o",
        "bug_status=EOL",
        "-o",
        "cc=foo1@example.com",
        "-o",
        "assigned_to=foo2@example.com",
    ]);
    assert_eq!(
        payload,
        json!({
            "bug_status": ["VERIFIED", "RELEASE_PENDING", "CLOSED"],
            "cc": "foo1@example.com",
            "assigned_to": "foo2@example.com",
            "include_fields": ["bug_id", "bug_status", "assigned_to", "short_desc"],
        })
    );
}

#[test]
fn status_all_leaves_status_out() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&["-b", "bz4", "-o", "bug_status=ALL"]);
    assert!(payload.get("bug_status").is_none());
}

#[test]
fn v3_outputformat_drops_include_fields() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&["-b", "bz3", "-o", "outputformat=%{bug_id}:%{product}"]);
    assert_eq!(payload, json!({}));
}

#[test]
fn v4_outputformat_selects_renamed_fields() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&[
        "-b",
        "generic-v4",
        "-o",
        "outputformat=%{bug_id}:%{short_desc}:%{product}:%{bug_id}",
    ]);
    assert_eq!(payload, json!({"include_fields": ["id", "summary", "product"]}));
}

// =============================================================================
// Phase 2: Extended Backend
// =============================================================================

#[test]
fn extended_indexed_emails() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&[
        "-b",
        "rhbugzilla",
        "-o",
        "cc=foo1@example.com",
        "-o",
        "reporter=foo3@example.com",
    ]);
    assert_eq!(
        payload,
        json!({
            "email1": "foo1@example.com",
            "emailcc1": true,
            "emailtype1": "substring",
            "email2": "foo3@example.com",
            "emailreporter2": true,
            "emailtype2": "substring",
            "query_format": "advanced",
            "include_fields": ["bug_id", "bug_status", "assigned_to", "short_desc"],
        })
    );
}

#[test]
fn extended_boolean_charts() {
    let scratch = Scratch::new();
    let payload = scratch.compile(&[
        "-b",
        "rhbugzilla",
        "-o",
        "blocked=123456",
        "-o",
        "flag=needinfo & devel_ack",
        "-o",
        "boolean_query=!foo-bar-baz | label-wontfix-yes",
    ]);
    assert_eq!(
        payload,
        json!({
            "field0-0-0": "blocked",
            "type0-0-0": "substring",
            "value0-0-0": "123456",
            "field1-0-0": "flagtypes.name",
            "type1-0-0": "substring",
            "value1-0-0": "needinfo",
            "field1-1-0": "flagtypes.name",
            "type1-1-0": "substring",
            "value1-1-0": "devel_ack",
            "negate2": 1,
            "field2-0-0": "foo",
            "type2-0-0": "bar",
            "value2-0-0": "baz",
            "field2-0-1": "label",
            "type2-0-1": "wontfix",
            "value2-0-1": "yes",
            "query_format": "advanced",
            "include_fields": ["bug_id", "bug_status", "assigned_to", "short_desc"],
        })
    );
}

#[test]
fn compile_is_deterministic() {
    let scratch = Scratch::new();
    let args = [
        "-b",
        "rhbugzilla",
        "-o",
        "qa_contact=foo4@example.com",
        "-o",
        "cc=foo1@example.com",
        "-o",
        "devel_whiteboard=x",
        "-o",
        "qa_whiteboard=y",
    ];
    assert_eq!(scratch.compile(&args), scratch.compile(&args));
}

// =============================================================================
// Phase 3: Option Sources
// =============================================================================

#[test]
fn config_supplies_backend_and_defaults() {
    let scratch = Scratch::with_config(
        "backend = \"bz4\"\n\n[defaults]\nproduct = \"Fedora\"\nbug_status = \"QE\"\n",
    );
    let payload = scratch.compile(&["-o", "bug_status=POST"]);
    assert_eq!(payload["product"], json!(["Fedora"]));
    assert_eq!(payload["bug_status"], json!(["POST"]));
}

#[test]
fn options_file_json() {
    let scratch = Scratch::new();
    let file = scratch.write("query.json", r#"{"bug_id": ["1234", "2480"], "oneline": true}"#);
    let payload = scratch.compile(&["-b", "bz3", "--options", &file]);
    assert_eq!(payload["id"], json!(["1234", "2480"]));
    assert!(payload["include_fields"]
        .as_array()
        .unwrap()
        .contains(&json!("flags")));
}

#[test]
fn options_file_toml() {
    let scratch = Scratch::new();
    let file = scratch.write("query.toml", "tags = \"fedora-review\"\n");
    let payload = scratch.compile(&["-b", "bz4", "--options", &file]);
    assert_eq!(payload["tag"], json!(["fedora-review"]));
}

#[test]
fn pretty_output_is_multiline() {
    let scratch = Scratch::new();
    scratch
        .bzq()
        .args(["compile", "-b", "bz3", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"include_fields\": [\n"));
}

// =============================================================================
// Phase 4: Failures
// =============================================================================

#[parameterized(
    chart_on_v4 = { &["-b", "bz4", "-o", "flag=needinfo"], "not supported" },
    boolean_on_v3 = { &["-b", "bz3", "-o", "boolean_query=foo-bar-baz"], "not supported" },
    malformed = { &["-b", "rhbz4", "-o", "boolean_query=foo-bar"], "malformed" },
    unknown_option = { &["-b", "bz4", "-o", "frobnicate=1"], "frobnicate" },
    bad_opt = { &["-b", "bz4", "-o", "=x"], "invalid --opt" },
)]
fn compile_errors(args: &[&str], message: &str) {
    let scratch = Scratch::new();
    scratch
        .bzq()
        .arg("compile")
        .args(args)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: "))
        .stderr(predicate::str::contains(message));
}

#[test]
fn missing_backend_hints_at_config() {
    let scratch = Scratch::new();
    scratch
        .bzq()
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("hint: pass --backend"));
}

#[test]
fn unknown_backend_rejected_by_parser() {
    let scratch = Scratch::new();
    scratch
        .bzq()
        .args(["compile", "--backend", "bugzilla9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bugzilla9"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("bzq")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["compile", "-b", "bz3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let scratch = Scratch::new();
    let output = scratch
        .bzq()
        .args(["-v", "compile", "-b", "bz3", "-o", "product=foo"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("compiling query"), "stderr: {stderr}");
    let _: Value = serde_json::from_slice(&output.stdout).unwrap();
}
