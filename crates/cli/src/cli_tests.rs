// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use yare::parameterized;

#[test]
fn command_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn parse_compile_with_everything() {
    let cli = Cli::try_parse_from([
        "bzq",
        "--config",
        "/tmp/bzq.toml",
        "-v",
        "compile",
        "--backend",
        "rhbugzilla",
        "--options",
        "q.json",
        "--opt",
        "product=Fedora",
        "-o",
        "oneline",
        "--pretty",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/tmp/bzq.toml")));
    assert!(cli.verbose);
    match cli.command {
        Command::Compile {
            backend,
            options,
            opts,
            pretty,
        } => {
            assert_eq!(backend, Some(BackendKind::ExtendedRolesV4));
            assert_eq!(options, Some(PathBuf::from("q.json")));
            assert_eq!(opts, vec!["product=Fedora", "oneline"]);
            assert!(pretty);
        }
        Command::Backends => panic!("expected compile"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["bzq", "compile", "--verbose", "--config", "c.toml"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
}

#[parameterized(
    canonical = { "generic-v4", BackendKind::GenericV4 },
    alias = { "bz3", BackendKind::GenericV3 },
    case_insensitive = { "RHBZ4", BackendKind::ExtendedRolesV4 },
)]
fn parse_backend_names(name: &str, expected: BackendKind) {
    let cli = Cli::try_parse_from(["bzq", "compile", "-b", name]).unwrap();
    match cli.command {
        Command::Compile { backend, .. } => assert_eq!(backend, Some(expected)),
        Command::Backends => panic!("expected compile"),
    }
}

#[test]
fn unknown_backend_is_rejected() {
    assert!(Cli::try_parse_from(["bzq", "compile", "--backend", "bugzilla9"]).is_err());
}

#[test]
fn parse_backends() {
    let cli = Cli::try_parse_from(["bzq", "backends"]).unwrap();
    assert!(matches!(cli.command, Command::Backends));
}
