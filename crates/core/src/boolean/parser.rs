// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parser for boolean query expressions.
//!
//! Grammar:
//!
//! ```text
//! expr := ['!'] term (('&' | '|') term)*
//! ```
//!
//! `&` starts a new row and `|` a new column in the current row, scanned left
//! to right with no precedence between them. For the generic form a term is a
//! `field-operator-value` triple split on the first two hyphens; for a
//! shortcut option it is a bare value paired with the option's field.

use crate::error::{Error, Result};

use super::expr::{BooleanExpr, Term, TermField};

/// Search operators the remote API accepts for shortcut terms.
pub const SEARCH_OPERATORS: &[&str] = &[
    "equals",
    "notequals",
    "anyexact",
    "substring",
    "casesubstring",
    "notsubstring",
    "anywordssubstr",
    "allwordssubstr",
    "nowordssubstr",
    "regexp",
    "notregexp",
    "lessthan",
    "lessthaneq",
    "greaterthan",
    "greaterthaneq",
    "anywords",
    "allwords",
    "nowords",
    "changedbefore",
    "changedafter",
    "changedfrom",
    "changedto",
    "changedby",
    "matches",
    "notmatches",
    "isempty",
    "isnotempty",
];

/// Parse a generic boolean query such as `keywords-substring-Partner & foo-bar-baz`.
///
/// # Errors
///
/// Returns [`Error::MalformedExpression`] if the text is empty, contains an
/// empty term, or a term is not a `field-operator-value` triple.
pub fn parse_boolean_query(input: &str) -> Result<BooleanExpr> {
    parse_with(input, |raw| {
        let mut parts = raw.splitn(3, '-');
        let (Some(field), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::malformed(
                input,
                format!("term '{raw}' is not of the form field-operator-value"),
            ));
        };

        let field = field.trim();
        let operator = operator.trim();
        if field.is_empty() || operator.is_empty() {
            return Err(Error::malformed(
                input,
                format!("term '{raw}' is missing a field or operator"),
            ));
        }

        Ok(Term {
            field: TermField::Verbatim(field.to_string()),
            operator: operator.to_string(),
            value: value.trim().to_string(),
        })
    })
}

/// Parse a shortcut option value such as `needinfo & devel_ack`.
///
/// Every term is a bare value searched in `field` with `operator`.
///
/// # Errors
///
/// Returns [`Error::MalformedExpression`] if `operator` is not a known search
/// operator, or the text is empty or contains an empty term.
pub fn parse_shortcut(input: &str, field: &str, operator: &str) -> Result<BooleanExpr> {
    if !SEARCH_OPERATORS.contains(&operator) {
        return Err(Error::malformed(
            input,
            format!("unknown search operator '{operator}'"),
        ));
    }

    parse_with(input, |raw| {
        Ok(Term {
            field: TermField::Shortcut(field.to_string()),
            operator: operator.to_string(),
            value: raw.to_string(),
        })
    })
}

/// Split `input` into rows and columns, turning each raw term into a [`Term`].
fn parse_with<F>(input: &str, mut make_term: F) -> Result<BooleanExpr>
where
    F: FnMut(&str) -> Result<Term>,
{
    let mut body = input.trim_start();
    let negate = match body.strip_prefix('!') {
        Some(rest) => {
            body = rest;
            true
        }
        None => false,
    };

    if body.trim().is_empty() {
        return Err(Error::malformed(input, "empty expression"));
    }

    let mut rows: Vec<Vec<Term>> = vec![Vec::new()];
    let mut start = 0;
    for (pos, c) in body.char_indices() {
        if c != '&' && c != '|' {
            continue;
        }
        push_term(input, &body[start..pos], &mut rows, &mut make_term)?;
        if c == '&' {
            rows.push(Vec::new());
        }
        start = pos + c.len_utf8();
    }
    push_term(input, &body[start..], &mut rows, &mut make_term)?;

    Ok(BooleanExpr { negate, rows })
}

fn push_term<F>(input: &str, raw: &str, rows: &mut [Vec<Term>], make_term: &mut F) -> Result<()>
where
    F: FnMut(&str) -> Result<Term>,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::malformed(input, "empty term next to '&' or '|'"));
    }
    let term = make_term(raw)?;
    if let Some(row) = rows.last_mut() {
        row.push(term);
    }
    Ok(())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
