// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bzq: command-line front end for the query compiler.
//!
//! Loads the user config, gathers options from a file and `--opt` flags,
//! and prints the compiled request payload as JSON.

mod cli;

pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};

use bzq_core::{BackendKind, EmailEncoding, QueryOption, QueryOptions, RequestPayload};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Runs a parsed command line, writing results to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Compile {
            backend,
            options,
            opts,
            pretty,
        } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            let backend = config.resolve_backend(backend)?;
            let options = gather_options(&config, options.as_deref(), &opts)?;
            let payload = compile(&options, backend)?;
            let json = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                payload.to_json()?
            };
            writeln!(out, "{json}")?;
        }
        Command::Backends => write!(out, "{}", backends_listing())?,
    }
    Ok(())
}

/// Layers `--opt` values over the options file, then over config defaults.
pub fn gather_options(
    config: &Config,
    file: Option<&Path>,
    opts: &[String],
) -> Result<QueryOptions> {
    let mut options = QueryOptions::new();
    for raw in opts {
        let (name, value) = parse_opt(raw)?;
        match value {
            None => options.set(name, true),
            Some(value) if options.get(name).is_some() => options.push(name, value),
            Some(value) => options.set(name, value),
        }
    }
    if let Some(path) = file {
        options.merge_defaults(&load_options_file(path)?);
    }
    options.merge_defaults(&config.defaults);
    Ok(options)
}

/// Splits `key=value`; a bare `key` yields no value.
pub fn parse_opt(raw: &str) -> Result<(&str, Option<&str>)> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value)),
        None => (raw.trim(), None),
    };
    if name.is_empty() {
        return Err(Error::InvalidOpt(raw.to_string()));
    }
    Ok((name, value))
}

/// Reads query options from a `.json` or `.toml` file.
pub fn load_options_file(path: &Path) -> Result<QueryOptions> {
    let content = fs::read_to_string(path)?;
    let options = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?,
        _ => {
            return Err(Error::UnsupportedOptionsFile {
                path: path.display().to_string(),
            })
        }
    };
    Ok(options)
}

fn compile(options: &QueryOptions, backend: BackendKind) -> Result<RequestPayload> {
    tracing::debug!(names = ?options.names().collect::<Vec<_>>(), "gathered options");
    let payload = bzq_core::compile(options, backend)?;
    tracing::debug!(keys = payload.len(), "compiled payload");
    Ok(payload)
}

/// One line per backend: name, aliases, and what it can encode.
pub fn backends_listing() -> String {
    let mut listing = String::new();
    for kind in BackendKind::ALL {
        let profile = kind.profile();
        let email = match profile.email_encoding() {
            EmailEncoding::Plain => "plain",
            EmailEncoding::IndexedRoles => "indexed",
        };
        let charts = if profile.supports(QueryOption::BooleanQuery) {
            "yes"
        } else {
            "no"
        };
        listing.push_str(&format!(
            "{:<18} aliases: {:<16} email: {:<8} charts: {}\n",
            kind.as_str(),
            kind.aliases().join(", "),
            email,
            charts
        ));
    }
    listing
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
