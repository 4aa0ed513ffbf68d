// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backend profiles and their static tables.
//!
//! Each generation of the remote search API names fields differently and
//! supports a different subset of options. A [`BackendProfile`] bundles
//! everything that varies:
//!
//! - the canonical option order (and therefore the supported option set)
//! - the field name table (option name → wire field)
//! - the status alias table (`DEV`, `QE`, ... → status codes)
//! - the email encoding ([`EmailEncoding::Plain`] or [`EmailEncoding::IndexedRoles`])
//! - the default `include_fields` and the output-format alias table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::options::QueryOption;

/// The API generations a query can be compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Version 3 API: plain fields, no boolean charts, no field selection aliases.
    #[serde(alias = "bugzilla3", alias = "bz3")]
    GenericV3,
    /// Version 4 API: plain fields, renamed include fields.
    #[serde(alias = "bugzilla4", alias = "bz4")]
    GenericV4,
    /// Extended version 4 API: boolean charts and indexed email roles.
    #[serde(alias = "rhbugzilla", alias = "rhbz4")]
    ExtendedRolesV4,
}

impl BackendKind {
    pub const ALL: &'static [BackendKind] = &[
        BackendKind::GenericV3,
        BackendKind::GenericV4,
        BackendKind::ExtendedRolesV4,
    ];

    /// Returns the canonical backend name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::GenericV3 => "generic-v3",
            BackendKind::GenericV4 => "generic-v4",
            BackendKind::ExtendedRolesV4 => "extended-roles-v4",
        }
    }

    /// Alternate names accepted when parsing, besides [`as_str`](Self::as_str).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            BackendKind::GenericV3 => &["bugzilla3", "bz3"],
            BackendKind::GenericV4 => &["bugzilla4", "bz4"],
            BackendKind::ExtendedRolesV4 => &["rhbugzilla", "rhbz4"],
        }
    }

    /// Returns the profile holding this backend's tables.
    pub fn profile(&self) -> &'static BackendProfile {
        match self {
            BackendKind::GenericV3 => &GENERIC_V3,
            BackendKind::GenericV4 => &GENERIC_V4,
            BackendKind::ExtendedRolesV4 => &EXTENDED_ROLES_V4,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "generic-v3" | "bugzilla3" | "bz3" => Ok(BackendKind::GenericV3),
            "generic-v4" | "bugzilla4" | "bz4" => Ok(BackendKind::GenericV4),
            "extended-roles-v4" | "rhbugzilla" | "rhbz4" => Ok(BackendKind::ExtendedRolesV4),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

/// How email-role options are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailEncoding {
    /// `cc=addr`, `assigned_to=addr`, ...
    Plain,
    /// `email{n}=addr`, `emailtype{n}=<match>`, `email<role>{n}=true`.
    IndexedRoles,
}

/// Semantic name → wire name lookup, built from static layers.
///
/// Later layers shadow earlier ones.
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    layers: &'static [&'static [(&'static str, &'static str)]],
}

impl FieldTable {
    pub const fn new(layers: &'static [&'static [(&'static str, &'static str)]]) -> Self {
        Self { layers }
    }

    /// Returns the wire name for `name`, if the table knows it.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.layers.iter().rev().find_map(|layer| {
            layer
                .iter()
                .find(|(semantic, _)| *semantic == name)
                .map(|(_, wire)| *wire)
        })
    }

    /// Returns the wire name for `name`, or `name` itself when unknown.
    pub fn translate<'a>(&self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Result of looking a status value up in a [`StatusTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusExpansion {
    /// Match every status: no `bug_status` constraint at all.
    Any,
    /// An explicit list of status codes.
    Codes(Vec<String>),
}

/// Status alias → ordered status codes.
#[derive(Debug, Clone, Copy)]
pub struct StatusTable {
    any_alias: &'static str,
    groups: &'static [(&'static str, &'static [&'static str])],
}

impl StatusTable {
    /// Expands a status value.
    ///
    /// Aliases match exactly. Anything else is a literal status name, with
    /// commas separating several literals. Returns None for an empty value.
    pub fn expand(&self, raw: &str) -> Option<StatusExpansion> {
        let raw = raw.trim();
        if raw == self.any_alias {
            return Some(StatusExpansion::Any);
        }
        if let Some((_, codes)) = self.groups.iter().find(|(alias, _)| *alias == raw) {
            return Some(StatusExpansion::Codes(
                codes.iter().map(|c| c.to_string()).collect(),
            ));
        }

        let literals: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if literals.is_empty() {
            None
        } else {
            Some(StatusExpansion::Codes(literals))
        }
    }

    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.any_alias).chain(self.groups.iter().map(|(alias, _)| *alias))
    }
}

/// Naming and encoding rules for one generation of the search API.
#[derive(Debug)]
pub struct BackendProfile {
    kind: BackendKind,
    email: EmailEncoding,
    option_order: &'static [QueryOption],
    fields: FieldTable,
    statuses: StatusTable,
    default_include_fields: &'static [&'static str],
    include_aliases: Option<FieldTable>,
}

impl BackendProfile {
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn email_encoding(&self) -> EmailEncoding {
        self.email
    }

    /// Options this backend supports, in the order they are compiled.
    pub fn option_order(&self) -> &'static [QueryOption] {
        self.option_order
    }

    pub fn supports(&self, option: QueryOption) -> bool {
        self.option_order.contains(&option)
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    pub fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    pub fn default_include_fields(&self) -> Vec<String> {
        self.default_include_fields
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    /// Alias table for caller-selected output fields.
    ///
    /// None means this backend cannot restrict the returned fields.
    pub fn include_aliases(&self) -> Option<&FieldTable> {
        self.include_aliases.as_ref()
    }

    /// Resolves the wire field for `option`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOption`] if the field table lacks it.
    pub fn wire_name(&self, option: &str) -> Result<&'static str> {
        self.fields.get(option).ok_or_else(|| Error::UnsupportedOption {
            option: option.to_string(),
            backend: self.kind.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_INCLUDE_FIELDS: &[&str] = &["bug_id", "bug_status", "assigned_to", "short_desc"];

/// Fields shown by the one-line output mode, identical on every backend.
pub const ONELINE_INCLUDE_FIELDS: &[&str] = &[
    "bug_id",
    "bug_status",
    "assigned_to",
    "component",
    "target_milestone",
    "short_desc",
    "flags",
    "keywords",
    "blockedby",
];

const STATUSES: StatusTable = StatusTable {
    any_alias: "ALL",
    groups: &[
        (
            "DEV",
            &[
                "NEW", "ASSIGNED", "NEEDINFO", "ON_DEV", "MODIFIED", "POST", "REOPENED",
            ],
        ),
        ("QE", &["ASSIGNED", "ON_QA", "FAILS_QA", "PASSES_QA"]),
        ("EOL", &["VERIFIED", "RELEASE_PENDING", "CLOSED"]),
        (
            "OPEN",
            &[
                "NEW",
                "ASSIGNED",
                "MODIFIED",
                "ON_DEV",
                "ON_QA",
                "VERIFIED",
                "RELEASE_PENDING",
                "POST",
            ],
        ),
    ],
};

const PLAIN_FIELDS: &[(&str, &str)] = &[
    ("product", "product"),
    ("component", "component"),
    ("components_file", "component"),
    ("version", "version"),
    ("bug_id", "id"),
    ("short_desc", "short_desc"),
    ("long_desc", "longdesc"),
    ("bug_status", "bug_status"),
    ("keywords", "keywords"),
    ("keywords_type", "keywords_type"),
    ("url", "bug_file_loc"),
    ("url_type", "bug_file_loc_type"),
    ("status_whiteboard", "status_whiteboard"),
    ("status_whiteboard_type", "status_whiteboard_type"),
    ("severity", "bug_severity"),
    ("priority", "priority"),
    ("target_milestone", "target_milestone"),
    ("tags", "tag"),
    ("quicksearch", "quicksearch"),
    ("savedsearch", "savedsearch"),
    ("savedsearch_sharer_id", "sharer_id"),
    ("cc", "cc"),
    ("assigned_to", "assigned_to"),
    ("reporter", "reporter"),
    ("qa_contact", "qa_contact"),
];

const CHART_FIELDS: &[(&str, &str)] = &[
    ("fixed_in", "cf_fixed_in"),
    ("blocked", "blocked"),
    ("dependson", "dependson"),
    ("flag", "flagtypes.name"),
    ("qa_whiteboard", "cf_qa_whiteboard"),
    ("devel_whiteboard", "cf_devel_whiteboard"),
    ("alias", "alias"),
];

/// Old display field names → names understood by version 4 servers.
const V4_INCLUDE_ALIASES: &[(&str, &str)] = &[
    ("bug_id", "id"),
    ("short_desc", "summary"),
    ("comment", "description"),
    ("rep_platform", "platform"),
    ("bug_severity", "severity"),
    ("bug_status", "status"),
    ("blockedby", "blocks"),
    ("blocked", "blocks"),
    ("dependson", "depends_on"),
    ("reporter", "creator"),
    ("bug_file_loc", "url"),
    ("dupe_id", "dupe_of"),
    ("longdescs", "comments"),
    ("opendate", "creation_time"),
    ("creation_ts", "creation_time"),
    ("status_whiteboard", "whiteboard"),
    ("last_changed", "last_change_time"),
];

const PLAIN_LAYERS: &[&[(&str, &str)]] = &[PLAIN_FIELDS];
const EXTENDED_LAYERS: &[&[(&str, &str)]] = &[PLAIN_FIELDS, CHART_FIELDS];
const V4_ALIAS_LAYERS: &[&[(&str, &str)]] = &[V4_INCLUDE_ALIASES];

const PLAIN_ORDER: &[QueryOption] = &[
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
    QueryOption::Oneline,
    QueryOption::OutputFormat,
];

// Chart numbers follow this order: fixed_in, blocked, dependson, flag,
// qa_whiteboard, devel_whiteboard, alias, then every boolean_query.
const EXTENDED_ORDER: &[QueryOption] = &[
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
    QueryOption::EmailType,
    QueryOption::Cc,
    QueryOption::AssignedTo,
    QueryOption::Reporter,
    QueryOption::QaContact,
    QueryOption::BooleanType,
    QueryOption::FixedIn,
    QueryOption::Blocked,
    QueryOption::DependsOn,
    QueryOption::Flag,
    QueryOption::QaWhiteboard,
    QueryOption::DevelWhiteboard,
    QueryOption::Alias,
    QueryOption::BooleanQuery,
    QueryOption::Oneline,
    QueryOption::OutputFormat,
];

pub static GENERIC_V3: BackendProfile = BackendProfile {
    kind: BackendKind::GenericV3,
    email: EmailEncoding::Plain,
    option_order: PLAIN_ORDER,
    fields: FieldTable::new(PLAIN_LAYERS),
    statuses: STATUSES,
    default_include_fields: DEFAULT_INCLUDE_FIELDS,
    include_aliases: None,
};

pub static GENERIC_V4: BackendProfile = BackendProfile {
    kind: BackendKind::GenericV4,
    email: EmailEncoding::Plain,
    option_order: PLAIN_ORDER,
    fields: FieldTable::new(PLAIN_LAYERS),
    statuses: STATUSES,
    default_include_fields: DEFAULT_INCLUDE_FIELDS,
    include_aliases: Some(FieldTable::new(V4_ALIAS_LAYERS)),
};

pub static EXTENDED_ROLES_V4: BackendProfile = BackendProfile {
    kind: BackendKind::ExtendedRolesV4,
    email: EmailEncoding::IndexedRoles,
    option_order: EXTENDED_ORDER,
    fields: FieldTable::new(EXTENDED_LAYERS),
    statuses: STATUSES,
    default_include_fields: DEFAULT_INCLUDE_FIELDS,
    include_aliases: Some(FieldTable::new(V4_ALIAS_LAYERS)),
};

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
