// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Boolean expression types.
//!
//! A boolean expression is a list of rows joined by `&`; each row is a list of
//! alternatives joined by `|`. On the wire every row becomes a chart row and
//! every alternative a column within it:
//!
//! ```text
//! a-substring-1 & b-substring-2 | c-substring-3
//! └── row 0 ──┘   └────────── row 1 ─────────┘
//!                 └ col 0 ──┘   └── col 1 ───┘
//! ```

/// Where a term's field name comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermField {
    /// Written out by the caller in a `field-operator-value` triple; sent as is.
    Verbatim(String),
    /// Implied by a shortcut option; resolved through the backend's field table.
    Shortcut(String),
}

impl TermField {
    /// Returns the name as written, before any table lookup.
    pub fn name(&self) -> &str {
        match self {
            TermField::Verbatim(name) | TermField::Shortcut(name) => name,
        }
    }
}

/// One `(field, operator, value)` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: TermField,
    pub operator: String,
    pub value: String,
}

/// A parsed boolean expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanExpr {
    /// Set when the text started with `!`; negates the whole chart.
    pub negate: bool,
    /// Rows in textual order, each holding its columns in textual order.
    pub rows: Vec<Vec<Term>>,
}

impl BooleanExpr {
    /// Iterates terms with their `(row, column)` position.
    pub fn positioned_terms(&self) -> impl Iterator<Item = (usize, usize, &Term)> {
        self.rows.iter().enumerate().flat_map(|(row, columns)| {
            columns
                .iter()
                .enumerate()
                .map(move |(column, term)| (row, column, term))
        })
    }

    pub fn term_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}
