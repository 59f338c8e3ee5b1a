use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use vessel_model::{RowIndex, VesselRecord};

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

/// Read a vessel export into text records.
///
/// The first row is the header. Every value stays a string. Empty lines are
/// not records, but a delimiter-only row is kept as a record with blank
/// fields so it still counts toward the batch.
pub fn read_vessel_csv(path: &Path) -> Result<Vec<VesselRecord>> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(file, path)?;
    debug!(
        path = %path.display(),
        record_count = records.len(),
        "read vessel csv"
    );
    Ok(records)
}

/// Same as [`read_vessel_csv`], for in-memory or streamed input.
pub fn read_vessel_csv_from_reader<R: Read>(reader: R) -> Result<Vec<VesselRecord>> {
    read_records(reader, Path::new("<reader>"))
}

fn read_records<R: Read>(input: R, path: &Path) -> Result<Vec<VesselRecord>> {
    let parse_error = |error: csv::Error| IngestError::CsvParse {
        path: PathBuf::from(path),
        message: error.to_string(),
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = reader.records();
    let headers: Vec<String> = match rows.next() {
        Some(record) => record
            .map_err(parse_error)?
            .iter()
            .map(normalize_header)
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for (ordinal, record) in rows.enumerate() {
        let record = record.map_err(parse_error)?;
        let mut vessel = VesselRecord::new(RowIndex(ordinal));
        for (header, value) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            vessel
                .fields
                .entry(header.clone())
                .or_insert_with(|| normalize_cell(value));
        }
        records.push(vessel);
    }
    Ok(records)
}
