//! Reference table loading from a directory of CSV exports.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use vessel_model::ReferenceId;

use crate::error::{ReferenceError, Result};
use crate::table::{ReferenceEntry, ReferenceSet, ReferenceTable, TABLE_SPECS, TableSpec};

/// Load all three reference tables from `<dir>/<table>.csv`.
pub fn load_reference_dir(dir: &Path) -> Result<ReferenceSet> {
    let mut set = ReferenceSet::default();
    for spec in TABLE_SPECS {
        let path = dir.join(format!("{}.csv", spec.table));
        if !path.is_file() {
            return Err(ReferenceError::MissingFile { path });
        }
        *set.table_mut(spec.kind) = load_reference_csv(&path, &spec)?;
    }
    Ok(set)
}

/// Load one reference table from a CSV file laid out per `spec`.
pub fn load_reference_csv(path: &Path, spec: &TableSpec) -> Result<ReferenceTable> {
    let (headers, rows) = read_csv_rows(path)?;
    for column in [Some(spec.id_column), Some(spec.code_column), spec.secondary_column]
        .into_iter()
        .flatten()
    {
        if !headers.iter().any(|header| header == column) {
            return Err(ReferenceError::MissingColumn {
                column: column.to_string(),
                table: spec.table.to_string(),
            });
        }
    }

    let mut table = ReferenceTable::new(spec.kind);
    for (line, row) in rows.iter().enumerate() {
        let code = get_field(row, spec.code_column);
        let Ok(id) = ReferenceId::new(get_field(row, spec.id_column)) else {
            warn!(table = spec.table, line, "skipping reference row without id");
            continue;
        };
        if code.is_empty() {
            warn!(table = spec.table, line, "skipping reference row without code");
            continue;
        }
        let mut entry = ReferenceEntry::new(id, code);
        entry.secondary_code = spec
            .secondary_column
            .and_then(|column| get_optional(row, column));
        table.push(entry);
    }
    debug!(
        table = spec.table,
        path = %path.display(),
        rows = table.len(),
        "loaded reference csv"
    );
    Ok(table)
}

type CsvRows = (Vec<String>, Vec<BTreeMap<String, String>>);

/// Read a CSV file into header-keyed row maps, trimming values and BOMs.
fn read_csv_rows(path: &Path) -> Result<CsvRows> {
    let csv_error = |error: csv::Error| ReferenceError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    };
    let file = std::fs::File::open(path).map_err(|source| ReferenceError::io(path, source))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok((headers, rows))
}

fn get_field(row: &BTreeMap<String, String>, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

fn get_optional(row: &BTreeMap<String, String>, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}
