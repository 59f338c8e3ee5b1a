//! Record validation for vessel registry batches.
//!
//! Field checks ([`validate_imo`], [`ReferenceResolver`]) are pure and run
//! per record; [`detect_duplicates`] and [`classify`] work on the batch as a
//! whole. [`validate_batch`] wires them together.

#![deny(unsafe_code)]

pub mod classify;
pub mod duplicates;
pub mod engine;
pub mod imo;
pub mod resolve;
pub mod similarity;

pub use classify::{FieldChecks, FieldResolution, check_record, classify};
pub use duplicates::{detect_duplicates, duplicate_warnings};
pub use engine::{BatchValidation, validate_batch};
pub use imo::{IMO_LENGTH, InvalidImo, validate_imo};
pub use resolve::{MatchKind, ReferenceResolver, Resolution, Unresolved};
pub use similarity::{jaro_winkler_similarity, similarity, trigram_similarity};
