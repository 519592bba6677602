//! The file catalog produced by a hashing run.
//!
//! This module provides the [`Catalog`] collection and its entries, plus the
//! JSON persistence used by the `hash`, `show` and `dupes` commands.
//!
//! # Architecture
//!
//! * [`entry`]: The per-file record and its wire format.
//! * [`store`]: Reading and writing catalog files.
//!
//! # Ordering
//!
//! A freshly produced catalog lists entries in the order the hashing workers
//! completed them, which differs between runs. A loaded catalog keeps the
//! literal array order of the file it was read from.

pub mod entry;
pub mod store;

use std::path::PathBuf;

use serde::Serialize;

pub use entry::{timestamp_from_system_time, CatalogEntry, Fingerprint, Timestamp, UNKNOWN_OWNER};
pub use store::CatalogError;

/// Ordered collection of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from entries, keeping their order.
    #[must_use]
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterate over entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Consume the catalog, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    /// Sum of all entry sizes in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Paths of all entries.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Catalog {
    type Item = CatalogEntry;
    type IntoIter = std::vec::IntoIter<CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
