// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Boolean chart expressions.
//!
//! A small infix language for search conditions that cannot be expressed as
//! plain field matches:
//!
//! ```text
//! [!] term (& term | '|' term)*
//! ```
//!
//! # Terms
//!
//! - Generic form: `field-operator-value`, split on the first two hyphens
//!   (`keywords-substring-Partner`, `cf_fixed_in-regexp-1.2-3`)
//! - Shortcut form: a bare value (`needinfo`), paired with the field and
//!   operator of the option it came from
//!
//! # Operators
//!
//! - `&` - starts a new row (rows are ANDed)
//! - `|` - adds a column to the current row (columns are ORed)
//! - leading `!` - negates the whole chart
//!
//! # Examples
//!
//! ```text
//! keywords-substring-Partner & keywords-notsubstring-OtherQA
//! foo-bar-baz | foo-bar-wee
//! ! foo-bar-yargh
//! ```

mod chart;
mod expr;
mod parser;

pub use chart::{encode_chart, ChartIndex};
pub use expr::{BooleanExpr, Term, TermField};
pub use parser::{parse_boolean_query, parse_shortcut, SEARCH_OPERATORS};
