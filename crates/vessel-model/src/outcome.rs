use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FieldIssue, FieldKind, ModelError, ReferenceId, RowIndex};

/// Terminal record classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    Valid,
    Warning,
    Error,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Valid and warning records may be staged; error records never are.
    pub fn is_accepted(self) -> bool {
        !matches!(self, Self::Error)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one input record.
///
/// The status is derived from the issue lists at construction, so an
/// outcome cannot carry errors while claiming to be valid. There is no
/// mutation API; outcomes are built once by the classifier. Deserialization
/// goes through [`ValidationOutcome::new`] and rejects a stored status that
/// disagrees with the issue lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredOutcome")]
pub struct ValidationOutcome {
    row: RowIndex,
    status: RecordStatus,
    errors: Vec<FieldIssue>,
    warnings: Vec<FieldIssue>,
    resolved: BTreeMap<FieldKind, ReferenceId>,
    imo_normalized: Option<String>,
}

impl ValidationOutcome {
    pub fn new(
        row: RowIndex,
        errors: Vec<FieldIssue>,
        warnings: Vec<FieldIssue>,
        resolved: BTreeMap<FieldKind, ReferenceId>,
        imo_normalized: Option<String>,
    ) -> Self {
        let status = if !errors.is_empty() {
            RecordStatus::Error
        } else if !warnings.is_empty() {
            RecordStatus::Warning
        } else {
            RecordStatus::Valid
        };
        Self {
            row,
            status,
            errors,
            warnings,
            resolved,
            imo_normalized,
        }
    }

    pub fn row(&self) -> RowIndex {
        self.row
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn is_accepted(&self) -> bool {
        self.status.is_accepted()
    }

    pub fn errors(&self) -> &[FieldIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[FieldIssue] {
        &self.warnings
    }

    pub fn resolved(&self) -> &BTreeMap<FieldKind, ReferenceId> {
        &self.resolved
    }

    pub fn resolved_id(&self, kind: FieldKind) -> Option<&ReferenceId> {
        self.resolved.get(&kind)
    }

    pub fn imo_normalized(&self) -> Option<&str> {
        self.imo_normalized.as_deref()
    }
}

#[derive(Deserialize)]
struct StoredOutcome {
    row: RowIndex,
    status: RecordStatus,
    errors: Vec<FieldIssue>,
    warnings: Vec<FieldIssue>,
    resolved: BTreeMap<FieldKind, ReferenceId>,
    imo_normalized: Option<String>,
}

impl TryFrom<StoredOutcome> for ValidationOutcome {
    type Error = ModelError;

    fn try_from(stored: StoredOutcome) -> Result<Self, Self::Error> {
        let outcome = Self::new(
            stored.row,
            stored.errors,
            stored.warnings,
            stored.resolved,
            stored.imo_normalized,
        );
        if outcome.status != stored.status {
            return Err(ModelError::StatusMismatch {
                stored: stored.status,
                derived: outcome.status,
            });
        }
        Ok(outcome)
    }
}
