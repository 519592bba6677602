//! I/O operations for catalog files.
//!
//! Catalogs are stored as a pretty-printed JSON array (two-space indent),
//! rewritten in full on every save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Catalog, CatalogEntry};

/// Errors reading or writing a catalog file.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        /// Catalog file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The catalog file could not be written.
    #[error("Failed to write catalog {path}: {source}")]
    Write {
        /// Catalog file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The catalog file is not a valid catalog.
    #[error("Malformed catalog {path}: {source}")]
    Parse {
        /// Catalog file path
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The catalog could not be encoded as JSON.
    #[error("Failed to encode catalog: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Catalog {
    /// Serialize the catalog as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Encode`] if an entry cannot be represented,
    /// e.g. a path that is not valid UTF-8.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(self).map_err(CatalogError::Encode)
    }

    /// Parse a catalog from JSON.
    ///
    /// A `null` document is read as an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not an array of entries.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: Option<Vec<CatalogEntry>> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries.unwrap_or_default()))
    }

    /// Write the catalog to `path`, replacing any existing file.
    ///
    /// Nothing is written if encoding fails.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Wrote {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a catalog from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }
}
