//! JSON output formatter for duplicate reports.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "pairs": [
//!     {
//!       "hash": "2cf24dba...",
//!       "file_1": "/storage/a.txt",
//!       "created_at_1": "2024-03-09T14:05:07+02:00",
//!       "file_2": "/storage/b.txt",
//!       "created_at_2": "2024-03-09T14:05:07+02:00"
//!     }
//!   ],
//!   "summary": {
//!     "total_entries": 3,
//!     "duplicate_groups": 1,
//!     "duplicate_pairs": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_bytes": 5
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateReport, DuplicateSummary, PairRecord};

/// Serializable duplicate report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Every duplicate pair
    pub pairs: Vec<PairRecord>,
    /// Aggregate statistics
    pub summary: DuplicateSummary,
}

impl JsonOutput {
    /// Build the JSON view of a report.
    #[must_use]
    pub fn new(report: &DuplicateReport<'_>) -> Self {
        Self {
            pairs: report.pairs.iter().map(PairRecord::from).collect(),
            summary: report.summary,
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON output: {0}")]
    Io(#[from] std::io::Error),
}
