use vessel_model::RowIndex;

/// Failures of the staging store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid staging table name '{0}'")]
    InvalidTable(String),

    #[error("staging database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to serialize issue payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    /// The batch is too poor to load; nothing was written.
    #[error(
        "acceptance rate {:.1}% ({accepted}/{total}) is below the {:.1}% threshold",
        .rate * 100.0,
        .threshold * 100.0
    )]
    ThresholdNotMet {
        rate: f64,
        threshold: f64,
        accepted: usize,
        total: usize,
    },

    #[error("no input record for outcome at row {row}")]
    MissingRecord { row: RowIndex },

    #[error(transparent)]
    Store(#[from] StoreError),
}
