//! Fingerprint groups and the pairs they produce.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] holds every catalog entry sharing one fingerprint.
//! A group of `k` entries yields `k * (k - 1) / 2` [`DuplicatePair`]s, one
//! per unordered pair, in entry insertion order.
//!
//! # Example
//!
//! ```
//! use file_catalog::catalog::{CatalogEntry, Fingerprint};
//! use file_catalog::duplicates::group_by_fingerprint;
//! use chrono::{FixedOffset, TimeZone};
//!
//! let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let entries = vec![
//!     CatalogEntry::new("/a".into(), Fingerprint::from("aa"), 5, ts, ts),
//!     CatalogEntry::new("/b".into(), Fingerprint::from("aa"), 5, ts, ts),
//!     CatalogEntry::new("/c".into(), Fingerprint::from("cc"), 5, ts, ts),
//! ];
//!
//! let groups = group_by_fingerprint(&entries);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].pair_count(), 1);
//! assert_eq!(groups[1].pair_count(), 0);
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{CatalogEntry, Fingerprint};

/// Catalog entries sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<'a> {
    /// Fingerprint shared by every entry
    pub fingerprint: &'a Fingerprint,
    /// Entries in catalog order
    pub entries: Vec<&'a CatalogEntry>,
}

impl<'a> DuplicateGroup<'a> {
    /// Number of entries in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if this group has duplicates (2+ entries).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.entries.len() > 1
    }

    /// Number of unordered pairs: `k * (k - 1) / 2`.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        let k = self.entries.len();
        k * k.saturating_sub(1) / 2
    }

    /// Number of redundant copies (all entries but the first).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Bytes held by the redundant copies.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.entries.iter().skip(1).map(|e| e.size).sum()
    }

    /// Every unordered pair `(i, j)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = DuplicatePair<'a>> + '_ {
        let fingerprint = self.fingerprint;
        self.entries.iter().enumerate().flat_map(move |(i, &first)| {
            self.entries[i + 1..]
                .iter()
                .map(move |&second| DuplicatePair {
                    fingerprint,
                    first,
                    second,
                })
        })
    }
}

/// Two distinct catalog entries with the same fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePair<'a> {
    /// Shared fingerprint
    pub fingerprint: &'a Fingerprint,
    /// Entry appearing earlier in the catalog
    pub first: &'a CatalogEntry,
    /// Entry appearing later in the catalog
    pub second: &'a CatalogEntry,
}

/// Group entries by fingerprint in one pass.
///
/// Groups appear in order of the first occurrence of their fingerprint, and
/// entries within a group keep their relative order. Groups of one entry are
/// included.
#[must_use]
pub fn group_by_fingerprint<'a, I>(entries: I) -> Vec<DuplicateGroup<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut index: HashMap<&'a Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup<'a>> = Vec::new();

    for entry in entries {
        let slot = *index.entry(&entry.fingerprint).or_insert_with(|| {
            groups.push(DuplicateGroup {
                fingerprint: &entry.fingerprint,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].entries.push(entry);
    }

    groups
}

/// Statistics over the duplicate groups of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    /// Entries examined
    pub total_entries: usize,
    /// Groups with 2+ entries
    pub duplicate_groups: usize,
    /// Pairs emitted
    pub duplicate_pairs: usize,
    /// Redundant copies (entries beyond the first in each group)
    pub duplicate_files: usize,
    /// Bytes held by redundant copies
    pub reclaimable_bytes: u64,
}

impl DuplicateSummary {
    /// Summarize `groups` over a catalog of `total_entries` entries.
    #[must_use]
    pub fn from_groups(total_entries: usize, groups: &[DuplicateGroup<'_>]) -> Self {
        groups
            .iter()
            .filter(|g| g.has_duplicates())
            .fold(
                Self {
                    total_entries,
                    ..Self::default()
                },
                |mut summary, group| {
                    summary.duplicate_groups += 1;
                    summary.duplicate_pairs += group.pair_count();
                    summary.duplicate_files += group.duplicate_count();
                    summary.reclaimable_bytes += group.wasted_space();
                    summary
                },
            )
    }

    /// Check if any duplicates were found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_pairs > 0
    }
}
