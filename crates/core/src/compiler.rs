// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The option compiler.
//!
//! Walks the backend profile's canonical option order and compiles every
//! option the caller supplied into wire keys:
//!
//! - direct fields are copied under their wire name, with value shaping
//! - `bug_status` aliases are expanded through the status table
//! - email roles are encoded plain or as indexed roles
//! - chart options are parsed and encoded at the next free chart number
//! - output options replace the default `include_fields`
//!
//! Each option compiles into a fragment that is merged only once the whole
//! option succeeded. Options merged before a failing one stay in the payload.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::backend::{BackendKind, BackendProfile, EmailEncoding, StatusExpansion};
use crate::backend::ONELINE_INCLUDE_FIELDS;
use crate::boolean::{encode_chart, parse_boolean_query, parse_shortcut, SEARCH_OPERATORS};
use crate::error::{Error, Result};
use crate::options::{OptionValue, QueryOption, QueryOptions, Shape, Strategy};
use crate::payload::{PayloadValue, RequestPayload};

const INCLUDE_FIELDS: &str = "include_fields";
const QUERY_FORMAT: &str = "query_format";
const ADVANCED: &str = "advanced";
const DEFAULT_MATCH_TYPE: &str = "substring";
const LONGDESC_MATCH_TYPE: &str = "allwordssubstr";

// Placeholders look like `%{bug_id}` or `%{flags:needinfo}`; only the name
// before any colon selects a field.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"%\{([^}:]+)(?::[^}]*)?\}") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Compile `options` for `backend`.
///
/// # Errors
///
/// See [`QueryCompiler::compile`].
pub fn compile(options: &QueryOptions, backend: BackendKind) -> Result<RequestPayload> {
    QueryCompiler::new(backend.profile()).compile(options)
}

/// Field names referenced by an output format string, in order of first
/// appearance and without duplicates.
pub fn outputformat_fields(format: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(format) {
        if let Some(name) = caps.get(1).map(|m| m.as_str().trim()) {
            if !name.is_empty() && !fields.iter().any(|f| f == name) {
                fields.push(name.to_string());
            }
        }
    }
    fields
}

/// Counters that must not restart between options of one compilation.
#[derive(Debug, Clone, Copy)]
struct Counters {
    next_chart: usize,
    next_email: usize,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            next_chart: 0,
            next_email: 1,
        }
    }
}

/// Keys one option sets or clears.
#[derive(Debug, Default)]
struct Fragment {
    set: RequestPayload,
    clear: Vec<&'static str>,
}

impl Fragment {
    fn apply(self, payload: &mut RequestPayload) {
        for key in self.clear {
            payload.remove(key);
        }
        payload.merge(self.set);
    }
}

/// Compiles [`QueryOptions`] against one [`BackendProfile`].
///
/// The compiler holds no state between calls; compiling the same options
/// twice yields identical payloads.
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler<'a> {
    profile: &'a BackendProfile,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(profile: &'a BackendProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'a BackendProfile {
        self.profile
    }

    /// Compile `options` into a new payload.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedOption`] for an option this backend does not know
    /// - [`Error::MalformedExpression`] for an unparsable chart option
    /// - [`Error::InvalidOptionValue`] for a value of the wrong kind
    /// - [`Error::FileRead`] if the components file cannot be read
    pub fn compile(&self, options: &QueryOptions) -> Result<RequestPayload> {
        let mut payload = RequestPayload::new();
        self.compile_into(options, &mut payload)?;
        Ok(payload)
    }

    /// Compile `options` into `payload`.
    ///
    /// Unknown option names are rejected before anything is written. After
    /// that, each option is merged as a unit: on error, options compiled
    /// earlier remain in `payload` and the failing one left no trace.
    ///
    /// # Errors
    ///
    /// See [`compile`](Self::compile).
    pub fn compile_into(&self, options: &QueryOptions, payload: &mut RequestPayload) -> Result<()> {
        self.check_supported(options)?;

        let backend = self.profile.kind();
        tracing::debug!(%backend, options = options.len(), "compiling query");

        payload.insert(INCLUDE_FIELDS, self.profile.default_include_fields());

        let mut counters = Counters::default();
        for &option in self.profile.option_order() {
            let Some(value) = options.get_option(option) else {
                continue;
            };
            tracing::debug!(%option, "compiling option");

            let mut next = counters;
            let fragment = self.compile_option(option, value, options, &mut next)?;
            counters = next;
            fragment.apply(payload);
        }

        Ok(())
    }

    fn check_supported(&self, options: &QueryOptions) -> Result<()> {
        for name in options.names() {
            match QueryOption::from_name(name) {
                Some(option) if self.profile.supports(option) => {}
                _ => return Err(self.unsupported(name)),
            }
        }
        Ok(())
    }

    fn unsupported(&self, option: &str) -> Error {
        Error::UnsupportedOption {
            option: option.to_string(),
            backend: self.profile.kind().to_string(),
        }
    }

    fn compile_option(
        &self,
        option: QueryOption,
        value: &OptionValue,
        options: &QueryOptions,
        counters: &mut Counters,
    ) -> Result<Fragment> {
        match option.strategy() {
            Strategy::Direct(shape) => self.compile_direct(option, shape, value),
            Strategy::Status => self.compile_status(option, value),
            Strategy::Email => self.compile_email(option, value, options, counters),
            Strategy::Chart => self.compile_chart(option, value, options, counters),
            Strategy::Modifier => {
                let modifier = text(option, value)?;
                if option == QueryOption::BooleanType && !SEARCH_OPERATORS.contains(&modifier) {
                    return Err(Error::malformed(
                        modifier,
                        format!("unknown search operator '{modifier}'"),
                    ));
                }
                Ok(Fragment::default())
            }
            Strategy::Output => self.compile_output(option, value),
        }
    }

    fn compile_direct(
        &self,
        option: QueryOption,
        shape: Shape,
        value: &OptionValue,
    ) -> Result<Fragment> {
        let key = self.profile.wire_name(option.as_str())?;
        let mut fragment = Fragment::default();

        match shape {
            Shape::Verbatim => {
                let value = match value {
                    OptionValue::Text(s) => PayloadValue::Text(s.clone()),
                    OptionValue::List(items) => PayloadValue::List(items.clone()),
                    OptionValue::Flag(_) => return Err(invalid(option, "a string or list")),
                };
                fragment.set.insert(key, value);
            }
            Shape::List => {
                let items = list(option, value)?;
                if !items.is_empty() {
                    fragment.set.insert(key, items);
                }
            }
            Shape::CommaList => {
                let items: Vec<String> = list(option, value)?
                    .iter()
                    .flat_map(|item| item.split(','))
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect();
                if !items.is_empty() {
                    fragment.set.insert(key, items);
                }
            }
            Shape::File => {
                let path = text(option, value)?;
                let items = read_lines(Path::new(path))?;
                if !items.is_empty() {
                    fragment.set.insert(key, items);
                }
            }
            Shape::LongText => {
                fragment.set.insert(key, text(option, value)?);
                fragment
                    .set
                    .insert(format!("{key}_type"), LONGDESC_MATCH_TYPE);
            }
        }

        Ok(fragment)
    }

    fn compile_status(&self, option: QueryOption, value: &OptionValue) -> Result<Fragment> {
        let key = self.profile.wire_name(option.as_str())?;
        let raw = text(option, value)?;
        let mut fragment = Fragment::default();

        match self.profile.statuses().expand(raw) {
            Some(StatusExpansion::Any) => fragment.clear.push(key),
            Some(StatusExpansion::Codes(codes)) => {
                fragment.set.insert(key, codes);
            }
            None => return Err(self.unsupported(&format!("{option}='{raw}'"))),
        }

        Ok(fragment)
    }

    fn compile_email(
        &self,
        option: QueryOption,
        value: &OptionValue,
        options: &QueryOptions,
        counters: &mut Counters,
    ) -> Result<Fragment> {
        let role = self.profile.wire_name(option.as_str())?;
        let address = text(option, value)?;
        let mut fragment = Fragment::default();

        match self.profile.email_encoding() {
            EmailEncoding::Plain => {
                fragment.set.insert(role, address);
            }
            EmailEncoding::IndexedRoles => {
                let match_type = match options.get_option(QueryOption::EmailType) {
                    Some(v) => text(QueryOption::EmailType, v)?,
                    None => DEFAULT_MATCH_TYPE,
                };
                let n = counters.next_email;
                fragment.set.insert(format!("email{n}"), address);
                fragment.set.insert(format!("emailtype{n}"), match_type);
                fragment.set.insert(format!("email{role}{n}"), true);
                fragment.set.insert(QUERY_FORMAT, ADVANCED);
                counters.next_email += 1;
            }
        }

        Ok(fragment)
    }

    fn compile_chart(
        &self,
        option: QueryOption,
        value: &OptionValue,
        options: &QueryOptions,
        counters: &mut Counters,
    ) -> Result<Fragment> {
        let backend = self.profile.kind().to_string();
        let operator = match options.get_option(QueryOption::BooleanType) {
            Some(v) => text(QueryOption::BooleanType, v)?,
            None => DEFAULT_MATCH_TYPE,
        };

        let first_chart = counters.next_chart;
        let mut fragment = Fragment::default();
        for raw in list(option, value)? {
            let expr = match option {
                QueryOption::BooleanQuery => parse_boolean_query(&raw)?,
                _ => parse_shortcut(&raw, option.as_str(), operator)?,
            };
            let chart = counters.next_chart;
            tracing::debug!(%option, chart, "assigned chart");
            fragment
                .set
                .merge(encode_chart(&expr, chart, self.profile.fields(), &backend)?);
            counters.next_chart += 1;
        }
        if counters.next_chart > first_chart {
            fragment.set.insert(QUERY_FORMAT, ADVANCED);
        }

        Ok(fragment)
    }

    fn compile_output(&self, option: QueryOption, value: &OptionValue) -> Result<Fragment> {
        let mut fragment = Fragment::default();

        match option {
            QueryOption::Oneline => {
                let enabled = value.as_flag().ok_or_else(|| invalid(option, "a flag"))?;
                if enabled {
                    let fields: Vec<String> =
                        ONELINE_INCLUDE_FIELDS.iter().map(|f| f.to_string()).collect();
                    fragment.set.insert(INCLUDE_FIELDS, fields);
                }
            }
            _ => {
                let format = text(option, value)?;
                match self.profile.include_aliases() {
                    Some(aliases) => {
                        let mut fields: Vec<String> = Vec::new();
                        for name in outputformat_fields(format) {
                            let wire = aliases.translate(&name).to_string();
                            if !fields.contains(&wire) {
                                fields.push(wire);
                            }
                        }
                        fragment.set.insert(INCLUDE_FIELDS, fields);
                    }
                    // No field selection: the server returns whole records.
                    None => fragment.clear.push(INCLUDE_FIELDS),
                }
            }
        }

        Ok(fragment)
    }
}

fn invalid(option: QueryOption, expected: &'static str) -> Error {
    Error::InvalidOptionValue {
        option: option.to_string(),
        expected,
    }
}

fn text(option: QueryOption, value: &OptionValue) -> Result<&str> {
    value.as_text().ok_or_else(|| invalid(option, "a string"))
}

fn list(option: QueryOption, value: &OptionValue) -> Result<Vec<String>> {
    value
        .to_list()
        .ok_or_else(|| invalid(option, "a string or list of strings"))
}

/// Read a file with one entry per line, skipping blank lines.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
