#![deny(unsafe_code)]

pub mod aliases;
pub mod csv_loader;
pub mod error;
pub mod index;
pub mod sqlite_loader;
pub mod table;

pub use crate::aliases::{FLAG_ALIASES, flag_alias};
pub use crate::csv_loader::{load_reference_csv, load_reference_dir};
pub use crate::error::{ReferenceError, Result};
pub use crate::index::{IndexKey, ReferenceHit, ReferenceIndex};
pub use crate::sqlite_loader::{load_reference_sqlite, load_reference_table};
pub use crate::table::{
    FLAG_TABLE, GEAR_TYPE_TABLE, ReferenceEntry, ReferenceSet, ReferenceTable, TABLE_SPECS,
    TableSpec, VESSEL_TYPE_TABLE,
};
