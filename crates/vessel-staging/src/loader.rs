use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use vessel_model::{RowIndex, StagingOptions, ValidationOutcome, VesselRecord};

use crate::error::{StagingError, StoreError};
use crate::row::StagingRow;
use crate::store::StagingStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub written: usize,
    pub rate: f64,
}

/// Share of non-error outcomes; 0.0 for an empty batch.
pub fn acceptance_rate(outcomes: &[ValidationOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    accepted as f64 / outcomes.len() as f64
}

/// Write every accepted record to `store`, provided the batch clears the
/// quality threshold.
///
/// The threshold is checked before any row is built, so a refused batch
/// never reaches the store. Rows go to `options.table`. Store failures are
/// returned unchanged.
pub fn load_staging(
    outcomes: &[ValidationOutcome],
    records: &[VesselRecord],
    store: &mut dyn StagingStore,
    options: &StagingOptions,
) -> Result<LoadSummary, StagingError> {
    let total = outcomes.len();
    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    let rate = acceptance_rate(outcomes);

    if total == 0 || rate < options.threshold {
        warn!(
            total,
            accepted,
            rate,
            threshold = options.threshold,
            "staging refused: acceptance rate below threshold"
        );
        return Err(StagingError::ThresholdNotMet {
            rate,
            threshold: options.threshold,
            accepted,
            total,
        });
    }

    let by_row: HashMap<RowIndex, &VesselRecord> =
        records.iter().map(|record| (record.row, record)).collect();
    let rows = outcomes
        .iter()
        .filter(|outcome| outcome.is_accepted())
        .map(|outcome| {
            let record = by_row
                .get(&outcome.row())
                .ok_or(StagingError::MissingRecord { row: outcome.row() })?;
            StagingRow::from_outcome(record, outcome).map_err(|e| StoreError::from(e).into())
        })
        .collect::<Result<Vec<_>, StagingError>>()?;

    let written = store.bulk_insert(&options.table, &rows)?;
    info!(
        table = %options.table,
        total,
        written,
        rejected = total - accepted,
        "staging load complete"
    );
    Ok(LoadSummary {
        total,
        accepted,
        rejected: total - accepted,
        written,
        rate,
    })
}
