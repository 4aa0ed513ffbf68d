// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for query compilation.

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur while compiling a query.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed boolean expression '{input}': {reason}")]
    MalformedExpression { input: String, reason: String },

    #[error("option '{option}' is not supported by the {backend} backend")]
    UnsupportedOption { option: String, backend: String },

    #[error("invalid value for option '{option}'\n  hint: expected {expected}")]
    InvalidOptionValue {
        option: String,
        expected: &'static str,
    },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown backend: '{0}'\n  hint: valid backends are: generic-v3, generic-v4, extended-roles-v4")]
    UnknownBackend(String),
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Error::MalformedExpression {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for query compilation.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
