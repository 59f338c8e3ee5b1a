use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RowIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    /// Several records share one normalized IMO number.
    ImoDuplicate,
    /// Several records share an exact `(vessel_name, flag_code)` pair.
    NameFlagDuplicate,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImoDuplicate => f.write_str("duplicate IMO"),
            Self::NameFlagDuplicate => f.write_str("duplicate name/flag"),
        }
    }
}

/// A batch-wide duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFinding {
    pub kind: DuplicateKind,
    /// Display key; name/flag keys are rendered as `name|flag`.
    pub key: String,
    pub count: usize,
    /// Member rows in input order.
    pub rows: Vec<RowIndex>,
}
