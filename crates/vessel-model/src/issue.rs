//! Per-field problems attached to a validation outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue categories, used for per-type aggregation in batch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    MissingName,
    InvalidImo,
    UnknownFlag,
    UnknownGearType,
    UnknownVesselType,
    GearFuzzyMatch,
    DuplicateImo,
    DuplicateNameFlag,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingName => "MISSING_NAME",
            Self::InvalidImo => "INVALID_IMO",
            Self::UnknownFlag => "UNKNOWN_FLAG",
            Self::UnknownGearType => "UNKNOWN_GEAR_TYPE",
            Self::UnknownVesselType => "UNKNOWN_VESSEL_TYPE",
            Self::GearFuzzyMatch => "GEAR_FUZZY_MATCH",
            Self::DuplicateImo => "DUPLICATE_IMO",
            Self::DuplicateNameFlag => "DUPLICATE_NAME_FLAG",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit payload for issues that need more than a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueDetail {
    /// Reference code accepted through approximate matching.
    FuzzyMatch {
        original: String,
        matched: String,
        similarity: f64,
    },
    /// Key shared with other records in the batch.
    Duplicate { key: String, count: usize },
}

/// A `{field, message}` entry on an outcome's error or warning list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<IssueDetail>,
}

impl FieldIssue {
    pub fn new(kind: IssueKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: IssueDetail) -> Self {
        self.detail = Some(detail);
        self
    }
}
