#![deny(unsafe_code)]

pub mod duplicate;
pub mod error;
pub mod fields;
pub mod issue;
pub mod options;
pub mod outcome;
pub mod record;
pub mod reference;

pub use duplicate::{DuplicateFinding, DuplicateKind};
pub use error::{ModelError, Result};
pub use issue::{FieldIssue, IssueDetail, IssueKind};
pub use options::{
    DEFAULT_STAGING_TABLE, ReportOptions, SimilarityMetric, StagingOptions, ValidationOptions,
};
pub use outcome::{RecordStatus, ValidationOutcome};
pub use record::{RowIndex, VesselRecord};
pub use reference::{FieldKind, ReferenceId};
