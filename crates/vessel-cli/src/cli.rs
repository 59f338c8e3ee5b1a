//! CLI argument definitions for vessel-qc.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vessel-qc",
    version,
    about = "Validate vessel registry batches and stage the accepted records",
    long_about = "Validate raw vessel records (name, IMO number, flag, gear and vessel type)\n\
                  against reference tables, write a per-batch report, and bulk-load the\n\
                  accepted records into a staging table when the batch is good enough."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values (vessel names, codes) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a CSV batch, write its report, and load the staging table.
    Validate(ValidateArgs),

    /// Show the size of each reference table.
    References(ReferenceArgs),

    /// Check IMO numbers against the checksum rule.
    CheckImo(CheckImoArgs),
}

/// Where reference tables come from.
#[derive(Args, Clone)]
pub struct ReferenceArgs {
    /// Directory holding country_iso.csv, gear_types_fao.csv and vessel_types.csv.
    #[arg(long = "references", value_name = "DIR")]
    pub references: Option<PathBuf>,

    /// SQLite database with the reference tables and the staging table.
    #[arg(long = "database", value_name = "PATH", env = "VESSEL_QC_DATABASE")]
    pub database: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// CSV file with one vessel per row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub source: ReferenceArgs,

    /// Configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report path (default: <INPUT>.validation_report.json).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Minimum share of accepted records required to load (0.0 to 1.0).
    #[arg(long = "threshold", value_name = "RATE")]
    pub threshold: Option<f64>,

    /// Staging table name.
    #[arg(long = "staging-table", value_name = "TABLE")]
    pub staging_table: Option<String>,

    /// Number of error and warning records sampled in the report.
    #[arg(long = "sample-limit", value_name = "N")]
    pub sample_limit: Option<usize>,

    /// Validate and report without writing to the staging table.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CheckImoArgs {
    /// IMO numbers to check.
    #[arg(value_name = "IMO", required = true)]
    pub values: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
