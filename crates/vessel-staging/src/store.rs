//! Staging write targets.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tracing::debug;

use vessel_model::ReferenceId;

use crate::error::StoreError;
use crate::row::StagingRow;

/// A bulk write target for accepted records.
///
/// `bulk_insert` is all-or-nothing: on `Err` no row of the call is visible.
pub trait StagingStore {
    fn bulk_insert(&mut self, table: &str, rows: &[StagingRow]) -> Result<usize, StoreError>;
}

/// Staging tables in a SQLite database.
///
/// The database is opened on the first insert, and the target table is
/// created inside that insert's transaction.
#[derive(Debug)]
pub struct SqliteStagingStore {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteStagingStore {
    /// Point at a database file without touching it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    /// Wrap an already open connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            path: PathBuf::new(),
            conn: Some(conn),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    pub fn connection(&mut self) -> Result<&Connection, StoreError> {
        self.connect().map(|conn| &*conn)
    }

    pub fn row_count(&mut self, table: &str) -> Result<usize, StoreError> {
        check_table(table)?;
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = self.connect()?.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn connect(&mut self) -> Result<&mut Connection, StoreError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                debug!(path = %self.path.display(), "opening staging database");
                Connection::open(&self.path)?
            }
        };
        Ok(self.conn.insert(conn))
    }
}

impl StagingStore for SqliteStagingStore {
    fn bulk_insert(&mut self, table: &str, rows: &[StagingRow]) -> Result<usize, StoreError> {
        check_table(table)?;
        // Dropping the transaction without commit rolls every statement back,
        // table creation included.
        let tx = self.connect()?.transaction()?;
        tx.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_row INTEGER NOT NULL,
                vessel_name TEXT NOT NULL,
                imo_normalized TEXT,
                flag_ref TEXT,
                gear_type_ref TEXT,
                vessel_type_ref TEXT,
                status TEXT NOT NULL,
                errors_json TEXT NOT NULL,
                warnings_json TEXT NOT NULL
            );"
        ))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} (source_row, vessel_name, imo_normalized, flag_ref,
                    gear_type_ref, vessel_type_ref, status, errors_json, warnings_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ))?;
            for row in rows {
                stmt.execute(params![
                    row.source_row.get() as i64,
                    row.vessel_name,
                    row.imo_normalized,
                    row.flag_ref.as_ref().map(ReferenceId::as_str),
                    row.gear_type_ref.as_ref().map(ReferenceId::as_str),
                    row.vessel_type_ref.as_ref().map(ReferenceId::as_str),
                    row.status.as_str(),
                    row.errors_json,
                    row.warnings_json,
                ])?;
            }
        }
        tx.commit()?;
        debug!(table, rows = rows.len(), "staging rows committed");
        Ok(rows.len())
    }
}

/// In-memory target for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStagingStore {
    rows: Vec<StagingRow>,
}

impl MemoryStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[StagingRow] {
        &self.rows
    }
}

impl StagingStore for MemoryStagingStore {
    fn bulk_insert(&mut self, table: &str, rows: &[StagingRow]) -> Result<usize, StoreError> {
        check_table(table)?;
        self.rows.extend_from_slice(rows);
        Ok(rows.len())
    }
}

fn check_table(table: &str) -> Result<(), StoreError> {
    if is_valid_table_name(table) {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

/// Whether `name` can be used unquoted as a staging table name.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_must_be_identifiers() {
        assert!(is_valid_table_name("vessel_staging_validated"));
        assert!(!is_valid_table_name("staging; DROP TABLE x"));
        assert!(!is_valid_table_name("1table"));
        assert!(!is_valid_table_name(""));

        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStagingStore::open(dir.path().join("staging.db"));
        assert!(matches!(
            store.bulk_insert("bad-name", &[]),
            Err(StoreError::InvalidTable(_))
        ));
        assert!(!store.is_connected());
        assert!(!store.path().exists());
    }

    #[test]
    fn table_is_created_on_first_insert() {
        let mut store = SqliteStagingStore::new(Connection::open_in_memory().unwrap());
        assert_eq!(store.bulk_insert("staged", &[]).unwrap(), 0);
        assert_eq!(store.row_count("staged").unwrap(), 0);
    }
}
