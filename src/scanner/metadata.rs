//! Catalog entry extraction for a single file.
//!
//! [`MetadataExtractor`] stats a file, fingerprints its content and builds
//! the [`CatalogEntry`]. Timestamps:
//!
//! - `last_modified` is the modification time.
//! - `created_at` is the birth time where the platform reports one,
//!   otherwise the modification time.
//! - `last_accessed` repeats the modification time; access times change
//!   as a side effect of hashing and would not be stable.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use super::{ContentHasher, HashError};
use crate::catalog::{timestamp_from_system_time, CatalogEntry};

/// Builds catalog entries from files on disk.
#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor {
    hasher: ContentHasher,
}

impl MetadataExtractor {
    /// Create an extractor using the default [`ContentHasher`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a specific hasher.
    #[must_use]
    pub fn with_hasher(hasher: ContentHasher) -> Self {
        Self { hasher }
    }

    /// The hasher used for fingerprints.
    #[must_use]
    pub fn hasher(&self) -> &ContentHasher {
        &self.hasher
    }

    /// Stat and hash `path`, producing its catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the stat fails (e.g. the file was removed
    /// after enumeration), if hashing fails, or if a timestamp cannot be
    /// represented.
    pub fn extract(&self, path: &Path) -> Result<CatalogEntry, HashError> {
        let metadata = fs::metadata(path).map_err(|e| HashError::from_io(path, e))?;
        let fingerprint = self.hasher.hash(path)?;

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);
        let timestamp = |time| {
            timestamp_from_system_time(time)
                .ok_or_else(|| HashError::TimestampOutOfRange(path.to_path_buf()))
        };

        Ok(CatalogEntry::new(
            path.to_path_buf(),
            fingerprint,
            metadata.len(),
            timestamp(created)?,
            timestamp(modified)?,
        ))
    }
}
