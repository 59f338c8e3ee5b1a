pub mod csv_records;
pub mod error;

pub use csv_records::{read_vessel_csv, read_vessel_csv_from_reader};
pub use error::{IngestError, Result};
