//! Reference table loading from the relational store.
//!
//! Each table is read with a single query at batch start; resolution then
//! runs against the in-memory index instead of issuing one round trip per
//! record.

use rusqlite::Connection;
use rusqlite::types::Value;
use tracing::{debug, warn};

use vessel_model::ReferenceId;

use crate::error::{ReferenceError, Result};
use crate::table::{ReferenceEntry, ReferenceSet, ReferenceTable, TABLE_SPECS, TableSpec};

/// Load all three reference tables from an open SQLite connection.
pub fn load_reference_sqlite(conn: &Connection) -> Result<ReferenceSet> {
    let mut set = ReferenceSet::default();
    for spec in TABLE_SPECS {
        *set.table_mut(spec.kind) = load_reference_table(conn, &spec)?;
    }
    Ok(set)
}

/// Load one reference table, preserving physical row order.
pub fn load_reference_table(conn: &Connection, spec: &TableSpec) -> Result<ReferenceTable> {
    let secondary = spec.secondary_column.unwrap_or("NULL");
    let query = format!(
        "SELECT {id}, {code}, {secondary} FROM {table} ORDER BY rowid",
        id = spec.id_column,
        code = spec.code_column,
        table = spec.table,
    );
    let mut stmt = conn
        .prepare(&query)
        .map_err(|error| ReferenceError::database(spec.table, error))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, Value>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })
        .map_err(|error| ReferenceError::database(spec.table, error))?;

    let mut table = ReferenceTable::new(spec.kind);
    for row in rows {
        let (id, code, secondary_code) =
            row.map_err(|error| ReferenceError::database(spec.table, error))?;
        let code = code.map(|value| value.trim().to_string()).unwrap_or_default();
        let Some(id) = value_to_id(id) else {
            warn!(table = spec.table, code = %code, "skipping reference row without id");
            continue;
        };
        if code.is_empty() {
            warn!(table = spec.table, id = %id, "skipping reference row without code");
            continue;
        }
        let mut entry = ReferenceEntry::new(id, code);
        entry.secondary_code = secondary_code
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        table.push(entry);
    }
    debug!(table = spec.table, rows = table.len(), "loaded reference table");
    Ok(table)
}

fn value_to_id(value: Value) -> Option<ReferenceId> {
    let text = match value {
        Value::Integer(number) => number.to_string(),
        Value::Text(text) => text,
        Value::Real(number) => number.to_string(),
        Value::Blob(bytes) => String::from_utf8(bytes).ok()?,
        Value::Null => return None,
    };
    ReferenceId::new(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_integers_and_text() {
        assert_eq!(value_to_id(Value::Integer(7)).unwrap().as_str(), "7");
        assert_eq!(
            value_to_id(Value::Text("a1b2".to_string())).unwrap().as_str(),
            "a1b2"
        );
        assert!(value_to_id(Value::Null).is_none());
        assert!(value_to_id(Value::Text("  ".to_string())).is_none());
    }
}
