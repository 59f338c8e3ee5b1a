//! Batch validation: parallel field checks, then whole-batch passes.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, info_span};

use vessel_model::{DuplicateFinding, RecordStatus, ValidationOutcome, VesselRecord};

use crate::classify::{FieldChecks, check_record, classify};
use crate::duplicates::{detect_duplicates, duplicate_warnings};
use crate::resolve::ReferenceResolver;

/// Outcomes for a batch, in input order, plus the duplicate groups that
/// were merged into them.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchValidation {
    pub outcomes: Vec<ValidationOutcome>,
    pub duplicates: Vec<DuplicateFinding>,
}

impl BatchValidation {
    pub fn count(&self, status: RecordStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status() == status)
            .count()
    }
}

/// Validate a whole batch.
///
/// Field checks run on the rayon pool with no shared mutation. Duplicate
/// detection needs every record, so it runs only after all checks have
/// been collected; classification follows as a single pass.
pub fn validate_batch(
    records: &[VesselRecord],
    resolver: &ReferenceResolver<'_>,
) -> BatchValidation {
    let span = info_span!("validate", records = records.len());
    let _guard = span.enter();

    let start = Instant::now();
    let checks: Vec<FieldChecks> = records
        .par_iter()
        .map(|record| check_record(record, resolver))
        .collect();
    info!(
        records = checks.len(),
        duration_ms = start.elapsed().as_millis(),
        "field checks complete"
    );

    let start = Instant::now();
    let duplicates = detect_duplicates(records);
    let mut merged = duplicate_warnings(&duplicates);
    info!(
        findings = duplicates.len(),
        duration_ms = start.elapsed().as_millis(),
        "duplicate detection complete"
    );

    let outcomes: Vec<ValidationOutcome> = checks
        .iter()
        .map(|partial| {
            let extra = merged.remove(&partial.row).unwrap_or_default();
            classify(partial, &extra)
        })
        .collect();

    let batch = BatchValidation {
        outcomes,
        duplicates,
    };
    info!(
        valid = batch.count(RecordStatus::Valid),
        warning = batch.count(RecordStatus::Warning),
        error = batch.count(RecordStatus::Error),
        "classification complete"
    );
    batch
}
