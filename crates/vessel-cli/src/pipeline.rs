//! Batch pipeline: ingest, references, validation, report, staging.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags};
use tracing::{info, info_span, trace, warn};

use vessel_ingest::read_vessel_csv;
use vessel_model::{DuplicateFinding, FieldKind, ValidationOutcome, VesselRecord, fields};
use vessel_reference::{ReferenceIndex, ReferenceSet, load_reference_dir, load_reference_sqlite};
use vessel_report::{
    BatchReport, ReportArtifact, build_report, default_report_path, write_report_json,
};
use vessel_staging::{LoadSummary, SqliteStagingStore, StagingError, load_staging};
use vessel_validate::{ReferenceResolver, validate_batch};

use crate::config::QcConfig;
use crate::logging::redact_value;

/// Where reference tables are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    Directory(PathBuf),
    Database(PathBuf),
}

impl ReferenceSource {
    /// A CSV directory wins over the database when both are given.
    pub fn resolve(directory: Option<&Path>, database: Option<&Path>) -> Result<Self> {
        match (directory, database) {
            (Some(dir), _) => Ok(Self::Directory(dir.to_path_buf())),
            (None, Some(db)) => Ok(Self::Database(db.to_path_buf())),
            (None, None) => bail!(
                "no reference source: pass --references DIR or --database PATH \
                 (or set VESSEL_QC_DATABASE)"
            ),
        }
    }
}

/// Where accepted records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingTarget {
    DryRun,
    Database(PathBuf),
}

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub input: PathBuf,
    pub references: ReferenceSource,
    pub target: StagingTarget,
    pub report_path: Option<PathBuf>,
    pub config: QcConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loaded(LoadSummary),
    Refused {
        rate: f64,
        threshold: f64,
        accepted: usize,
        total: usize,
    },
    Skipped {
        threshold_met: bool,
    },
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input: PathBuf,
    pub report_path: PathBuf,
    pub report: BatchReport,
    pub duplicates: Vec<DuplicateFinding>,
    pub threshold: f64,
    pub load: LoadStatus,
}

impl BatchResult {
    /// False when the batch did not clear the staging threshold.
    pub fn succeeded(&self) -> bool {
        match self.load {
            LoadStatus::Loaded(_) => true,
            LoadStatus::Refused { .. } => false,
            LoadStatus::Skipped { threshold_met } => threshold_met,
        }
    }
}

/// Load all reference tables from the configured source.
pub fn load_references(source: &ReferenceSource) -> Result<ReferenceSet> {
    let start = Instant::now();
    let set = match source {
        ReferenceSource::Directory(dir) => load_reference_dir(dir)
            .with_context(|| format!("load reference tables from {}", dir.display()))?,
        ReferenceSource::Database(path) => {
            let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
                .with_context(|| format!("open reference database {}", path.display()))?;
            load_reference_sqlite(&conn)
                .with_context(|| format!("load reference tables from {}", path.display()))?
        }
    };
    info!(
        flags = set.flags.len(),
        gear_types = set.gear_types.len(),
        vessel_types = set.vessel_types.len(),
        duration_ms = start.elapsed().as_millis(),
        "reference tables loaded"
    );
    Ok(set)
}

/// Run one batch end to end.
///
/// The report is written before staging is attempted, so it exists even
/// when the load is refused. A refused load is a normal result; only
/// infrastructure failures are returned as errors.
pub fn run_batch(request: &BatchRequest) -> Result<BatchResult> {
    let batch_span = info_span!("batch", input = %request.input.display());
    let _batch_guard = batch_span.enter();
    let config = &request.config;

    let records = info_span!("ingest").in_scope(|| -> Result<Vec<VesselRecord>> {
        let start = Instant::now();
        let records = read_vessel_csv(&request.input)
            .with_context(|| format!("read {}", request.input.display()))?;
        info!(
            records = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(records)
    })?;

    let references = info_span!("references").in_scope(|| load_references(&request.references))?;
    let index = ReferenceIndex::build(&references);
    let resolver = ReferenceResolver::new(&index, &config.validation);
    let validation = validate_batch(&records, &resolver);
    trace_rejected(&records, &validation.outcomes);

    let report_path = request
        .report_path
        .clone()
        .unwrap_or_else(|| default_report_path(&request.input));
    let report = info_span!("report").in_scope(|| -> Result<BatchReport> {
        let report = build_report(&records, &validation.outcomes, &config.report);
        let artifact = ReportArtifact::new(report, config.staging.threshold)
            .with_source(&request.input)
            .context("fingerprint input")?;
        write_report_json(&report_path, &artifact)
            .with_context(|| format!("write report {}", report_path.display()))?;
        info!(path = %report_path.display(), "report written");
        Ok(artifact.report)
    })?;

    let load = info_span!("staging").in_scope(|| -> Result<LoadStatus> {
        match &request.target {
            StagingTarget::DryRun => {
                let threshold_met =
                    report.total > 0 && report.validation_rate >= config.staging.threshold;
                info!(threshold_met, "dry run: staging skipped");
                Ok(LoadStatus::Skipped { threshold_met })
            }
            StagingTarget::Database(path) => {
                let mut store = SqliteStagingStore::open(path);
                match load_staging(&validation.outcomes, &records, &mut store, &config.staging) {
                    Ok(summary) => Ok(LoadStatus::Loaded(summary)),
                    Err(StagingError::ThresholdNotMet {
                        rate,
                        threshold,
                        accepted,
                        total,
                    }) => Ok(LoadStatus::Refused {
                        rate,
                        threshold,
                        accepted,
                        total,
                    }),
                    Err(error) => Err(error).with_context(|| {
                        format!("staging load into {} failed", path.display())
                    }),
                }
            }
        }
    })?;

    if matches!(load, LoadStatus::Refused { .. }) {
        warn!(path = %report_path.display(), "batch refused; see report for details");
    }

    Ok(BatchResult {
        input: request.input.clone(),
        report_path,
        report,
        duplicates: validation.duplicates,
        threshold: config.staging.threshold,
        load,
    })
}

fn trace_rejected(records: &[VesselRecord], outcomes: &[ValidationOutcome]) {
    for (record, outcome) in records.iter().zip(outcomes) {
        if outcome.is_accepted() {
            continue;
        }
        trace!(
            row = outcome.row().get(),
            vessel_name = redact_value(record.value(fields::VESSEL_NAME)),
            flag_code = redact_value(record.value(FieldKind::Flag.field_name())),
            errors = outcome.errors().len(),
            "record rejected"
        );
    }
}
