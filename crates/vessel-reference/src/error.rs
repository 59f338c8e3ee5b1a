use std::path::PathBuf;

/// Failures while loading reference tables.
///
/// These are infrastructure errors: they abort the batch rather than being
/// recorded against individual records.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference table file not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("required column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    #[error("database error reading {table}: {source}")]
    Database {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl ReferenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn database(table: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            table: table.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
