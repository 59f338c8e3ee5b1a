//! Configuration options for validation, reporting, and staging.

use serde::{Deserialize, Serialize};

/// Score used for approximate gear-type matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// Trigram set overlap, as computed by PostgreSQL `pg_trgm`.
    #[default]
    Trigram,
    /// Jaro-Winkler similarity.
    JaroWinkler,
}

/// Options for the per-record field checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Approximate matches must score strictly above this value (0.0 to 1.0).
    pub fuzzy_threshold: f64,
    pub similarity: SimilarityMetric,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.6,
            similarity: SimilarityMetric::Trigram,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_similarity(mut self, metric: SimilarityMetric) -> Self {
        self.similarity = metric;
        self
    }
}

/// Options for batch report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Maximum number of error (and, separately, warning) records sampled.
    pub sample_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { sample_limit: 10 }
    }
}

/// Options for the quality-gated staging load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingOptions {
    /// Minimum share of non-error records required before anything is written.
    pub threshold: f64,
    /// Target staging table.
    pub table: String,
}

pub const DEFAULT_STAGING_TABLE: &str = "vessel_staging_validated";

impl Default for StagingOptions {
    fn default() -> Self {
        Self {
            threshold: 0.90,
            table: DEFAULT_STAGING_TABLE.to_string(),
        }
    }
}

impl StagingOptions {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}
