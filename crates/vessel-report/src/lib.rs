//! Batch report generation.
//!
//! [`build_report`] aggregates outcomes; [`ReportArtifact`] wraps the result
//! with provenance and [`write_report_json`] persists it.

#![deny(unsafe_code)]

mod artifact;
mod error;
mod summary;

pub use artifact::{
    REPORT_SCHEMA, REPORT_SCHEMA_VERSION, ReportArtifact, default_report_path, sha256_file,
    write_report_json,
};
pub use error::{ReportError, Result};
pub use summary::{BatchReport, RecordSample, build_report, rate};
