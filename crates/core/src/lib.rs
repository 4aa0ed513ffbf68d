// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bzq-core: search query compiler for bug tracker APIs
//!
//! Turns human-friendly search options and a small boolean filter language
//! into the exact request body one generation of the remote search API
//! expects. Compilation is pure: apart from reading an optional components
//! file, nothing here performs I/O.
//!
//! ```rust,ignore
//! use bzq_core::{compile, BackendKind, QueryOptions};
//!
//! let options = QueryOptions::new()
//!     .with("product", "Fedora")
//!     .with("bug_status", "DEV")
//!     .with("flag", "needinfo & devel_ack");
//! let payload = compile(&options, BackendKind::ExtendedRolesV4)?;
//! println!("{}", payload.to_json()?);
//! ```

pub mod backend;
pub mod boolean;
pub mod compiler;
pub mod error;
pub mod options;
pub mod payload;

pub use backend::{BackendKind, BackendProfile, EmailEncoding, FieldTable, StatusExpansion};
pub use boolean::{BooleanExpr, ChartIndex, Term, TermField};
pub use compiler::{compile, outputformat_fields, QueryCompiler};
pub use error::{Error, Result};
pub use options::{OptionValue, QueryOption, QueryOptions};
pub use payload::{PayloadValue, RequestPayload};
