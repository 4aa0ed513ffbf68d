// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration.
//!
//! Configuration lives in `<config dir>/bzq/config.toml` (or wherever
//! `--config` points) and includes:
//! - `backend`: the API generation to compile for when `--backend` is absent
//! - `[defaults]`: query options applied underneath every compile
//!
//! ```toml
//! backend = "rhbugzilla"
//!
//! [defaults]
//! product = "Fedora"
//! bug_status = "DEV"
//! ```

use bzq_core::{BackendKind, QueryOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "bzq";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendKind>,
    /// Options the caller's own options are layered over.
    #[serde(default, skip_serializing_if = "QueryOptions::is_empty")]
    pub defaults: QueryOptions,
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `explicit` when given, otherwise the default config file if one
    /// exists.
    ///
    /// A missing default file yields an empty config; a missing explicit
    /// file is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Command-line backend first, then the configured one.
    pub fn resolve_backend(&self, cli: Option<BackendKind>) -> Result<BackendKind> {
        cli.or(self.backend).ok_or(Error::NoBackend)
    }
}

/// `<config dir>/bzq/config.toml`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
