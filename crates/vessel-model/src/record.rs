use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal position of a record in its input batch (0-based).
///
/// Carried through every outcome and finding so problems can be traced back
/// to the source row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowIndex(pub usize);

impl RowIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raw input row: field name to untouched text value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub row: RowIndex,
    pub fields: BTreeMap<String, String>,
}

impl VesselRecord {
    pub fn new(row: RowIndex) -> Self {
        Self {
            row,
            fields: BTreeMap::new(),
        }
    }

    /// Build a record from `(field, value)` pairs.
    pub fn from_pairs<I, K, V>(row: RowIndex, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row,
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field value, or the empty string when the field is absent.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Absent, empty, and whitespace-only values are all blank.
    pub fn is_blank(&self, field: &str) -> bool {
        self.value(field).trim().is_empty()
    }
}
