//! Output formatters for catalogs and duplicate reports.
//!
//! This module provides different output formats:
//! - Plain text for `show` and the `dupes` table
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use file_catalog::catalog::Catalog;
//! use file_catalog::duplicates::DuplicateReport;
//! use file_catalog::output::{JsonOutput, PairTable};
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("file_metadata.json")).unwrap();
//! let report = DuplicateReport::from_catalog(&catalog);
//!
//! PairTable::new(false).write_to(&mut std::io::stdout(), &report.pairs).unwrap();
//! println!("{}", JsonOutput::new(&report).to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

use chrono::SecondsFormat;

use crate::catalog::Timestamp;

// Re-export main types
pub use csv::{CsvOutput, CsvOutputError};
pub use json::{JsonOutput, JsonOutputError};
pub use text::{entry_line, summary_line, write_entries, PairTable};

/// Render a timestamp the way the catalog file stores it.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
