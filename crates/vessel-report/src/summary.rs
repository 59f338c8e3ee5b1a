//! Aggregate statistics over a classified batch.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use vessel_model::{
    FieldIssue, IssueKind, RecordStatus, ReportOptions, RowIndex, ValidationOutcome, VesselRecord,
};

/// A sampled record for operator review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSample {
    pub row: RowIndex,
    /// Original field values of the record.
    pub fields: BTreeMap<String, String>,
    pub errors: Vec<FieldIssue>,
    pub warnings: Vec<FieldIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub valid: usize,
    pub warning: usize,
    pub error: usize,
    /// Records eligible for staging (`valid + warning`).
    pub accepted: usize,
    /// `accepted / total`, or 0.0 for an empty batch.
    pub validation_rate: f64,
    pub errors_by_type: BTreeMap<IssueKind, usize>,
    pub warnings_by_type: BTreeMap<IssueKind, usize>,
    pub sample_errors: Vec<RecordSample>,
    pub sample_warnings: Vec<RecordSample>,
}

impl BatchReport {
    pub fn count(&self, status: RecordStatus) -> usize {
        match status {
            RecordStatus::Valid => self.valid,
            RecordStatus::Warning => self.warning,
            RecordStatus::Error => self.error,
        }
    }
}

/// Summarize a batch. Pure; safe to call repeatedly on the same outcomes.
pub fn build_report(
    records: &[VesselRecord],
    outcomes: &[ValidationOutcome],
    options: &ReportOptions,
) -> BatchReport {
    let by_row: HashMap<RowIndex, &VesselRecord> =
        records.iter().map(|record| (record.row, record)).collect();

    let mut report = BatchReport {
        total: outcomes.len(),
        valid: 0,
        warning: 0,
        error: 0,
        accepted: 0,
        validation_rate: 0.0,
        errors_by_type: BTreeMap::new(),
        warnings_by_type: BTreeMap::new(),
        sample_errors: Vec::new(),
        sample_warnings: Vec::new(),
    };

    for outcome in outcomes {
        for issue in outcome.errors() {
            *report.errors_by_type.entry(issue.kind).or_default() += 1;
        }
        for issue in outcome.warnings() {
            *report.warnings_by_type.entry(issue.kind).or_default() += 1;
        }

        let samples = match outcome.status() {
            RecordStatus::Valid => {
                report.valid += 1;
                continue;
            }
            RecordStatus::Warning => {
                report.warning += 1;
                &mut report.sample_warnings
            }
            RecordStatus::Error => {
                report.error += 1;
                &mut report.sample_errors
            }
        };
        if samples.len() < options.sample_limit {
            samples.push(RecordSample {
                row: outcome.row(),
                fields: by_row
                    .get(&outcome.row())
                    .map(|record| record.fields.clone())
                    .unwrap_or_default(),
                errors: outcome.errors().to_vec(),
                warnings: outcome.warnings().to_vec(),
            });
        }
    }

    report.accepted = report.valid + report.warning;
    report.validation_rate = rate(report.accepted, report.total);
    report
}

/// Share of `part` in `total`, defined as 0.0 when `total` is 0.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_has_zero_rate() {
        let report = build_report(&[], &[], &ReportOptions::default());
        assert_eq!(report.total, 0);
        assert_eq!(report.validation_rate, 0.0);
        assert!(report.sample_errors.is_empty());
    }

    #[test]
    fn rate_is_a_plain_ratio() {
        assert_eq!(rate(92, 100), 0.92);
        assert_eq!(rate(0, 0), 0.0);
    }
}
