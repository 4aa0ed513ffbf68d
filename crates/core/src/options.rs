// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-facing query options.
//!
//! [`QueryOptions`] maps human-friendly option names (`product`, `bug_status`,
//! `flag`, ...) to raw values. [`QueryOption`] is the closed set of names the
//! compiler recognizes, each tagged with the [`Strategy`] used to compile it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw option value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Returns the value as a list of strings, or None for flags.
    pub fn to_list(&self) -> Option<Vec<String>> {
        match self {
            OptionValue::Text(s) => Some(vec![s.clone()]),
            OptionValue::List(items) => Some(items.clone()),
            OptionValue::Flag(_) => None,
        }
    }

    /// Returns the value as a single string, or None for lists and flags.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag value, or None for strings and lists.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(items: Vec<&str>) -> Self {
        OptionValue::List(items.into_iter().map(String::from).collect())
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Flag(b)
    }
}

/// Option name to raw value, as supplied by the caller.
///
/// Insertion order carries no meaning: the compiler walks options in the
/// backend profile's canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryOptions {
    values: BTreeMap<String, OptionValue>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets an option, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Appends a string to a repeatable option.
    ///
    /// A previous string value is promoted to a list; a previous flag is
    /// replaced.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let slot = self
            .values
            .entry(name.into())
            .or_insert_with(|| OptionValue::List(Vec::new()));
        match slot {
            OptionValue::List(items) => items.push(value),
            OptionValue::Text(prev) => {
                let prev = std::mem::take(prev);
                *slot = OptionValue::List(vec![prev, value]);
            }
            OptionValue::Flag(_) => *slot = OptionValue::List(vec![value]),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Looks up a recognized option by its canonical name.
    pub fn get_option(&self, option: QueryOption) -> Option<&OptionValue> {
        self.values.get(option.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Fills in every option from `defaults` that is not already set.
    pub fn merge_defaults(&mut self, defaults: &QueryOptions) {
        for (name, value) in &defaults.values {
            self.values
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

/// How the compiler treats an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Copied under its wire name with the given value shaping.
    Direct(Shape),
    /// Expanded through the status alias table into `bug_status`.
    Status,
    /// An email role (`cc`, `assigned_to`, ...).
    Email,
    /// Compiled into boolean chart keys.
    Chart,
    /// Tunes how other options compile; produces no keys itself.
    Modifier,
    /// Overrides `include_fields`.
    Output,
}

/// Value shaping for direct fields.
///
/// The list shapes emit no key when shaping leaves no entries (`[]`, `","`,
/// an empty file), as if the option had not been given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Passed through exactly as given.
    Verbatim,
    /// A string is wrapped in a one-element list.
    List,
    /// Every string is split on commas.
    CommaList,
    /// Names a file with one entry per line.
    File,
    /// Free text matched with a word-set operator.
    LongText,
}

/// Every option name the compiler recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOption {
    Product,
    Component,
    ComponentsFile,
    Version,
    BugId,
    ShortDesc,
    LongDesc,
    BugStatus,
    Keywords,
    KeywordsType,
    Url,
    UrlType,
    StatusWhiteboard,
    StatusWhiteboardType,
    Severity,
    Priority,
    TargetMilestone,
    Tags,
    Quicksearch,
    Savedsearch,
    SavedsearchSharerId,
    Cc,
    AssignedTo,
    Reporter,
    QaContact,
    EmailType,
    FixedIn,
    Blocked,
    DependsOn,
    Flag,
    QaWhiteboard,
    DevelWhiteboard,
    Alias,
    BooleanQuery,
    BooleanType,
    Oneline,
    OutputFormat,
}

impl QueryOption {
    pub const ALL: &'static [QueryOption] = &[
        QueryOption::Product,
        QueryOption::Component,
        QueryOption::ComponentsFile,
        QueryOption::Version,
        QueryOption::BugId,
        QueryOption::ShortDesc,
        QueryOption::LongDesc,
        QueryOption::BugStatus,
        QueryOption::Keywords,
        QueryOption::KeywordsType,
        QueryOption::Url,
        QueryOption::UrlType,
        QueryOption::StatusWhiteboard,
        QueryOption::StatusWhiteboardType,
        QueryOption::Severity,
        QueryOption::Priority,
        QueryOption::TargetMilestone,
        QueryOption::Tags,
        QueryOption::Quicksearch,
        QueryOption::Savedsearch,
        QueryOption::SavedsearchSharerId,
        QueryOption::Cc,
        QueryOption::AssignedTo,
        QueryOption::Reporter,
        QueryOption::QaContact,
        QueryOption::EmailType,
        QueryOption::FixedIn,
        QueryOption::Blocked,
        QueryOption::DependsOn,
        QueryOption::Flag,
        QueryOption::QaWhiteboard,
        QueryOption::DevelWhiteboard,
        QueryOption::Alias,
        QueryOption::BooleanQuery,
        QueryOption::BooleanType,
        QueryOption::Oneline,
        QueryOption::OutputFormat,
    ];

    /// Returns the option name as callers spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOption::Product => "product",
            QueryOption::Component => "component",
            QueryOption::ComponentsFile => "components_file",
            QueryOption::Version => "version",
            QueryOption::BugId => "bug_id",
            QueryOption::ShortDesc => "short_desc",
            QueryOption::LongDesc => "long_desc",
            QueryOption::BugStatus => "bug_status",
            QueryOption::Keywords => "keywords",
            QueryOption::KeywordsType => "keywords_type",
            QueryOption::Url => "url",
            QueryOption::UrlType => "url_type",
            QueryOption::StatusWhiteboard => "status_whiteboard",
            QueryOption::StatusWhiteboardType => "status_whiteboard_type",
            QueryOption::Severity => "severity",
            QueryOption::Priority => "priority",
            QueryOption::TargetMilestone => "target_milestone",
            QueryOption::Tags => "tags",
            QueryOption::Quicksearch => "quicksearch",
            QueryOption::Savedsearch => "savedsearch",
            QueryOption::SavedsearchSharerId => "savedsearch_sharer_id",
            QueryOption::Cc => "cc",
            QueryOption::AssignedTo => "assigned_to",
            QueryOption::Reporter => "reporter",
            QueryOption::QaContact => "qa_contact",
            QueryOption::EmailType => "emailtype",
            QueryOption::FixedIn => "fixed_in",
            QueryOption::Blocked => "blocked",
            QueryOption::DependsOn => "dependson",
            QueryOption::Flag => "flag",
            QueryOption::QaWhiteboard => "qa_whiteboard",
            QueryOption::DevelWhiteboard => "devel_whiteboard",
            QueryOption::Alias => "alias",
            QueryOption::BooleanQuery => "boolean_query",
            QueryOption::BooleanType => "booleantype",
            QueryOption::Oneline => "oneline",
            QueryOption::OutputFormat => "outputformat",
        }
    }

    /// Looks up an option by the name callers spell it with.
    pub fn from_name(name: &str) -> Option<Self> {
        QueryOption::ALL
            .iter()
            .copied()
            .find(|opt| opt.as_str() == name)
    }

    pub fn strategy(&self) -> Strategy {
        use QueryOption::*;
        match self {
            Product | Component | Tags => Strategy::Direct(Shape::List),
            ComponentsFile => Strategy::Direct(Shape::File),
            BugId => Strategy::Direct(Shape::CommaList),
            LongDesc => Strategy::Direct(Shape::LongText),
            Version | ShortDesc | Keywords | KeywordsType | Url | UrlType | StatusWhiteboard
            | StatusWhiteboardType | Severity | Priority | TargetMilestone | Quicksearch
            | Savedsearch | SavedsearchSharerId => Strategy::Direct(Shape::Verbatim),
            BugStatus => Strategy::Status,
            Cc | AssignedTo | Reporter | QaContact => Strategy::Email,
            FixedIn | Blocked | DependsOn | Flag | QaWhiteboard | DevelWhiteboard | Alias
            | BooleanQuery => Strategy::Chart,
            EmailType | BooleanType => Strategy::Modifier,
            Oneline | OutputFormat => Strategy::Output,
        }
    }
}

impl fmt::Display for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
