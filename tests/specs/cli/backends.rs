// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `bzq backends` and the top-level flags.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use yare::parameterized;

fn bzq() -> Command {
    cargo_bin_cmd!("bzq")
}

#[test]
fn backends_lists_all_three() {
    let output = bzq().arg("backends").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["generic-v3", "generic-v4", "extended-roles-v4"]);
}

#[parameterized(
    v3 = { "generic-v3", "bugzilla3, bz3" },
    v4 = { "generic-v4", "bugzilla4, bz4" },
    extended = { "extended-roles-v4", "rhbugzilla, rhbz4" },
)]
fn backends_show_aliases(name: &str, aliases: &str) {
    let output = bzq().arg("backends").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().find(|l| l.starts_with(name)).unwrap();
    assert!(line.contains(aliases), "line: {line}");
}

#[test]
fn only_extended_has_charts() {
    bzq()
        .arg("backends")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^generic-v3 .*charts: no$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^generic-v4 .*charts: no$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^extended-roles-v4 .*charts: yes$").unwrap());
}

#[test]
fn version_flag() {
    bzq()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bzq "))
        .stdout(predicate::str::is_match(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap());
}

#[test]
fn help_shows_examples() {
    bzq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("bzq compile --backend"));
}

#[test]
fn missing_subcommand_fails() {
    bzq().assert().failure();
}
