// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the bzq command-line front end.
///
/// Query compilation errors come through unchanged from `bzq-core`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Query(#[from] bzq_core::Error),

    #[error("invalid --opt '{0}'\n  hint: use key=value, or a bare key for a flag")]
    InvalidOpt(String),

    #[error("no backend selected\n  hint: pass --backend or set `backend` in the config file")]
    NoBackend,

    #[error("unsupported options file '{path}'\n  hint: use a .json or .toml file")]
    UnsupportedOptionsFile { path: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for bzq operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
