//! Casualty-record datasets loaded from CSV.
//!
//! A [`Record`] is a header-keyed row of free text. Two shapes exist
//! depending on the source file, described by [`DatasetKind`].

mod error;
mod loader;

#[cfg(test)]
mod loader_tests;

use std::sync::Arc;

pub use error::LoadError;
pub use loader::{LoadHandle, Source, fetch_text, load, parse_csv, spawn_load};

/// Field names used by the two dataset shapes.
pub mod fields {
    pub const NAME: &str = "Name";
    pub const DATE_OF_DEATH: &str = "Date of death";
    pub const VERDICT: &str = "Verdict";

    /// Claims file (Orient Affiliation shape)
    pub mod claims {
        pub use super::{DATE_OF_DEATH, NAME, VERDICT};
        pub const ARABIC_NAME: &str = "Arabic Name";
        pub const ORIENT_AFFILIATION: &str = "Orient Affiliation";
        pub const ORIENT_ADDITIONAL_INFO: &str = "Orient additional info";
        pub const PROFILE: &str = "Al-Qassam profile";
        pub const ADDITIONAL_INFO: &str = "Additional Info";
    }

    /// Timeline file (Orient claim shape)
    pub mod timeline {
        pub use super::{DATE_OF_DEATH, NAME, VERDICT};
        pub const DATE: &str = "Date";
        pub const ORIENT_CLAIM: &str = "Orient claim";
        pub const ORIENT_NOTE: &str = "Orient note";
        pub const ENTRY: &str = "al-Qassam entry";
        pub const ADDITIONAL_NOTES: &str = "Additional notes";
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dataset Kind
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Orient Affiliation claims with profile links
    Claims,
    /// Dated Orient claims with verdicts
    Timeline,
}

impl DatasetKind {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Claims => "claims",
            DatasetKind::Timeline => "timeline",
        }
    }

    /// Header row the source file is expected to carry, in file order.
    pub fn expected_headers(&self) -> &'static [&'static str] {
        use fields::{claims as c, timeline as t};
        match self {
            DatasetKind::Claims => &[
                c::NAME,
                c::ARABIC_NAME,
                c::DATE_OF_DEATH,
                c::ORIENT_AFFILIATION,
                c::ORIENT_ADDITIONAL_INFO,
                c::PROFILE,
                c::ADDITIONAL_INFO,
                c::VERDICT,
            ],
            DatasetKind::Timeline => &[
                t::DATE,
                t::NAME,
                t::DATE_OF_DEATH,
                t::ORIENT_CLAIM,
                t::ORIENT_NOTE,
                t::ENTRY,
                t::VERDICT,
                t::ADDITIONAL_NOTES,
            ],
        }
    }

    /// Free-text field holding the affiliation claim
    pub fn category_field(&self) -> &'static str {
        match self {
            DatasetKind::Claims => fields::claims::ORIENT_AFFILIATION,
            DatasetKind::Timeline => fields::timeline::ORIENT_CLAIM,
        }
    }

    pub fn verdict_field(&self) -> &'static str {
        fields::VERDICT
    }

    pub fn date_field(&self) -> &'static str {
        fields::DATE_OF_DEATH
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Record
// ─────────────────────────────────────────────────────────────────────────────

/// One casualty entry. Values are stored in header order; the header row is
/// shared between all records of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Build a record against a header row. Missing trailing values become
    /// blank and surplus values are dropped.
    pub fn new(headers: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(headers.len(), String::new());
        Self { headers, values }
    }

    /// Build a standalone record from `(field, value)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let headers: Arc<[String]> = pairs.iter().map(|(k, _)| k.to_string()).collect();
        let values = pairs.iter().map(|(_, v)| v.to_string()).collect();
        Self::new(headers, values)
    }

    /// Raw value of a field, or None when the header row lacks it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == field)
            .map(|i| self.values[i].as_str())
    }

    /// Raw value of a field, treating an absent field as blank.
    pub fn field(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dataset
// ─────────────────────────────────────────────────────────────────────────────

/// Parsed contents of one CSV resource.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    /// Display name of the source the rows came from
    pub source: String,
    pub headers: Arc<[String]>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compare the header row against the shape's expected fields.
    pub fn schema_report(&self) -> SchemaReport {
        let expected = self.kind.expected_headers();
        let missing = expected
            .iter()
            .filter(|e| !self.headers.iter().any(|h| h == *e))
            .map(|e| e.to_string())
            .collect();
        let unexpected = self
            .headers
            .iter()
            .filter(|h| !expected.contains(&h.as_str()))
            .cloned()
            .collect();
        SchemaReport {
            missing,
            unexpected,
        }
    }
}

/// Header differences between a file and its expected shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl SchemaReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}
