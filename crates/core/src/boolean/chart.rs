// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chart encoder.
//!
//! Turns a [`BooleanExpr`] into the positional keys of the remote search API:
//! `field{c}-{r}-{col}`, `type{c}-{r}-{col}`, `value{c}-{r}-{col}` per term and
//! `negate{c}=1` for a negated chart.

use std::fmt;

use crate::backend::FieldTable;
use crate::error::{Error, Result};
use crate::payload::{PayloadValue, RequestPayload};

use super::expr::{BooleanExpr, TermField};

/// Position of one term: chart, row and column, all zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChartIndex {
    pub chart: usize,
    pub row: usize,
    pub column: usize,
}

impl ChartIndex {
    pub fn new(chart: usize, row: usize, column: usize) -> Self {
        Self { chart, row, column }
    }

    /// Builds a positional key such as `field0-1-2`.
    pub fn key(&self, prefix: &str) -> String {
        format!("{prefix}{self}")
    }
}

impl fmt::Display for ChartIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.chart, self.row, self.column)
    }
}

/// Encode `expr` as chart number `chart` into a fresh payload fragment.
///
/// Verbatim fields are sent as written; shortcut fields are looked up in
/// `fields`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOption`] if a shortcut field is missing from
/// `fields`. Nothing is emitted in that case.
pub fn encode_chart(
    expr: &BooleanExpr,
    chart: usize,
    fields: &FieldTable,
    backend: &str,
) -> Result<RequestPayload> {
    let mut fragment = RequestPayload::new();

    for (row, column, term) in expr.positioned_terms() {
        let field = match &term.field {
            TermField::Verbatim(name) => Some(name.as_str()),
            TermField::Shortcut(name) => fields.get(name),
        };
        let field = field.ok_or_else(|| Error::UnsupportedOption {
            option: term.field.name().to_string(),
            backend: backend.to_string(),
        })?;

        let index = ChartIndex::new(chart, row, column);
        tracing::trace!(%index, %field, operator = %term.operator, "chart term");
        fragment.insert(index.key("field"), field);
        fragment.insert(index.key("type"), term.operator.clone());
        fragment.insert(index.key("value"), term.value.clone());
    }

    if expr.negate {
        fragment.insert(format!("negate{chart}"), PayloadValue::Int(1));
    }

    Ok(fragment)
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
