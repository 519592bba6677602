//! Command-line interface definitions for file-catalog.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, error format) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Hash everything under /storage into file_metadata.json
//! file-catalog hash
//!
//! # Hash another tree with 16 workers
//! file-catalog hash -s ~/photos -o photos.json --jobs 16
//!
//! # List catalog entries
//! file-catalog show -i photos.json
//!
//! # Report duplicate pairs as CSV
//! file-catalog dupes -i photos.json --format csv
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default catalog file for every subcommand.
pub const DEFAULT_CATALOG: &str = "file_metadata.json";

/// Default directory hashed by `hash`.
pub const DEFAULT_STORAGE: &str = "/storage";

/// Content-addressed file catalog with duplicate reporting.
///
/// Hashes every file under a directory into a JSON catalog, then lists the
/// catalog or reports files with identical content.
#[derive(Debug, Parser)]
#[command(name = "file-catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hash files in the storage directory and write the catalog
    Hash(HashArgs),
    /// Show hashed files from the catalog
    Show(ShowArgs),
    /// Find and display files with identical hashes
    Dupes(DupesArgs),
}

/// Arguments for the hash subcommand.
#[derive(Debug, Args)]
pub struct HashArgs {
    /// Path to the storage directory
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_STORAGE)]
    pub storage: PathBuf,

    /// Path to the output catalog file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CATALOG)]
    pub output: PathBuf,

    /// Number of hashing workers (default: cores x CPU_MULT_FACTOR)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(usize))]
    pub jobs: Option<usize>,
}

/// Arguments for the show subcommand.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Path to the input catalog file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CATALOG)]
    pub input: PathBuf,
}

/// Arguments for the dupes subcommand.
#[derive(Debug, Args)]
pub struct DupesArgs {
    /// Path to the input catalog file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CATALOG)]
    pub input: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ReportFormat,
}

/// Output format for the duplicate report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Fixed-width table
    Table,
    /// JSON document with pairs and summary
    Json,
    /// CSV, one row per pair
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}
