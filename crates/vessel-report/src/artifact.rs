//! The durable per-batch report document.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ReportError, Result};
use crate::summary::BatchReport;

pub const REPORT_SCHEMA: &str = "vessel-qc.validation-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

const REPORT_SUFFIX: &str = ".validation_report.json";

/// Report plus the provenance needed to audit it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,
    /// Staging threshold the batch was judged against.
    pub threshold: f64,
    pub threshold_met: bool,
    pub report: BatchReport,
}

impl ReportArtifact {
    pub fn new(report: BatchReport, threshold: f64) -> Self {
        Self {
            schema: REPORT_SCHEMA.to_string(),
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: None,
            source_sha256: None,
            threshold,
            threshold_met: report.total > 0 && report.validation_rate >= threshold,
            report,
        }
    }

    /// Record the input file name and content hash.
    pub fn with_source(mut self, path: &Path) -> Result<Self> {
        self.source_sha256 = Some(sha256_file(path)?);
        self.source = Some(path.display().to_string());
        Ok(self)
    }
}

/// `<input>.validation_report.json`, next to the input file.
pub fn default_report_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(REPORT_SUFFIX);
    PathBuf::from(name)
}

/// Write the artifact as pretty-printed JSON, creating parent directories.
pub fn write_report_json(path: &Path, artifact: &ReportArtifact) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|source| ReportError::io("create directory", parent, source))?;
    }
    let json = serde_json::to_string_pretty(artifact)?;
    std::fs::write(path, format!("{json}\n"))
        .map_err(|source| ReportError::io("write", path, source))
}

/// Hex-encoded SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| ReportError::io("open", path, source))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|source| ReportError::io("read", path, source))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
