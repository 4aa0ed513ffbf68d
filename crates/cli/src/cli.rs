// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bzq_core::BackendKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const QUICKSTART_HELP: &str = "\
Examples:
  bzq compile --backend rhbugzilla --opt product=Fedora --opt bug_status=DEV
  bzq compile --backend bz4 --options query.toml --pretty
  bzq backends";

#[derive(Parser)]
#[command(name = "bzq")]
#[command(version)]
#[command(about = "Compile bug tracker search options into API request payloads")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Config file (default: <config dir>/bzq/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log compilation steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile query options into a request payload (printed as JSON)
    Compile {
        /// API generation to compile for (overrides the config file)
        #[arg(long, short)]
        backend: Option<BackendKind>,

        /// Read options from a JSON or TOML file
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,

        /// Set an option (key=value); a bare key sets a flag; repeat to build a list
        #[arg(long = "opt", short = 'o', value_name = "KEY=VALUE")]
        opts: Vec<String>,

        /// Pretty-print the payload
        #[arg(long)]
        pretty: bool,
    },

    /// List supported backends and their aliases
    Backends,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
