//! Library side of the vessel-qc binary.

pub mod config;
pub mod logging;
pub mod pipeline;
