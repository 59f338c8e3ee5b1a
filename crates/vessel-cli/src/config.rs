//! `vessel-qc.toml` configuration.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use vessel_model::{ReportOptions, StagingOptions, ValidationOptions};
use vessel_staging::is_valid_table_name;

/// All tunables of one run. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QcConfig {
    pub validation: ValidationOptions,
    pub report: ReportOptions,
    pub staging: StagingOptions,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub threshold: Option<f64>,
    pub staging_table: Option<String>,
    pub sample_limit: Option<usize>,
}

impl QcConfig {
    /// Read a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Load the file if one is given, apply overrides, and check ranges.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(threshold) = overrides.threshold {
            config.staging.threshold = threshold;
        }
        if let Some(table) = &overrides.staging_table {
            config.staging.table = table.clone();
        }
        if let Some(limit) = overrides.sample_limit {
            config.report.sample_limit = limit;
        }
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.staging.threshold) {
            bail!(
                "staging threshold must be between 0 and 1, got {}",
                self.staging.threshold
            );
        }
        if !(0.0..=1.0).contains(&self.validation.fuzzy_threshold) {
            bail!(
                "fuzzy threshold must be between 0 and 1, got {}",
                self.validation.fuzzy_threshold
            );
        }
        if !is_valid_table_name(&self.staging.table) {
            bail!("invalid staging table name '{}'", self.staging.table);
        }
        Ok(())
    }
}
