//! CSV output formatter for duplicate reports.
//!
//! One row is generated for each duplicate pair.
//!
//! # Columns
//!
//! - `hash`: Shared content fingerprint (hexadecimal)
//! - `file_1`: Path of the earlier entry
//! - `created_at_1`: Its creation time (RFC 3339)
//! - `file_2`: Path of the later entry
//! - `created_at_2`: Its creation time (RFC 3339)

use std::io;

use thiserror::Error;

use crate::duplicates::{DuplicatePair, PairRecord};

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    pairs: &'a [DuplicatePair<'a>],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(pairs: &'a [DuplicatePair<'a>]) -> Self {
        Self { pairs }
    }

    /// Write the header and one row per pair.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.pairs.is_empty() {
            csv_writer.write_record(["hash", "file_1", "created_at_1", "file_2", "created_at_2"])?;
        }
        for pair in self.pairs {
            csv_writer.serialize(PairRecord::from(pair))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
