//! Quality-gated staging load.

#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod row;
pub mod store;

pub use error::{StagingError, StoreError};
pub use loader::{LoadSummary, acceptance_rate, load_staging};
pub use row::StagingRow;
pub use store::{MemoryStagingStore, SqliteStagingStore, StagingStore, is_valid_table_name};
