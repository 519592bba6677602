//! Duplicate detection over a materialized catalog.
//!
//! Detection is pure and synchronous: one linear pass groups entries by
//! fingerprint, then every group of two or more entries emits all of its
//! unordered pairs. Pair emission is quadratic in group size.

use serde::Serialize;

use super::groups::{group_by_fingerprint, DuplicateGroup, DuplicatePair, DuplicateSummary};
use crate::catalog::Catalog;
use crate::output::format_timestamp;

/// Fingerprint groups that contain at least two entries.
#[must_use]
pub fn find_duplicate_groups(catalog: &Catalog) -> Vec<DuplicateGroup<'_>> {
    group_by_fingerprint(catalog)
        .into_iter()
        .filter(DuplicateGroup::has_duplicates)
        .collect()
}

/// Every unordered pair of entries sharing a fingerprint, each exactly once.
///
/// Pairs are ordered by group (first appearance of the fingerprint), then by
/// entry position within the group.
#[must_use]
pub fn find_duplicates(catalog: &Catalog) -> Vec<DuplicatePair<'_>> {
    let groups = find_duplicate_groups(catalog);
    let mut pairs = Vec::with_capacity(groups.iter().map(DuplicateGroup::pair_count).sum());
    for group in &groups {
        pairs.extend(group.pairs());
    }
    log::debug!(
        "Found {} duplicate pairs in {} groups",
        pairs.len(),
        groups.len()
    );
    pairs
}

/// Duplicate pairs of a catalog together with their summary.
#[derive(Debug, Clone)]
pub struct DuplicateReport<'a> {
    /// Pairs in report order
    pub pairs: Vec<DuplicatePair<'a>>,
    /// Aggregate statistics
    pub summary: DuplicateSummary,
}

impl<'a> DuplicateReport<'a> {
    /// Detect duplicates in `catalog`.
    #[must_use]
    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        let groups = find_duplicate_groups(catalog);
        let summary = DuplicateSummary::from_groups(catalog.len(), &groups);
        let pairs = groups.iter().flat_map(|g| g.pairs()).collect();
        Self { pairs, summary }
    }

    /// Check if the catalog contained no duplicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Owned, serializable view of a pair for machine-readable reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRecord {
    /// Shared fingerprint
    pub hash: String,
    /// First file path
    pub file_1: String,
    /// First file creation time (RFC 3339)
    pub created_at_1: String,
    /// Second file path
    pub file_2: String,
    /// Second file creation time (RFC 3339)
    pub created_at_2: String,
}

impl From<&DuplicatePair<'_>> for PairRecord {
    fn from(pair: &DuplicatePair<'_>) -> Self {
        Self {
            hash: pair.fingerprint.to_string(),
            file_1: pair.first.path.display().to_string(),
            created_at_1: format_timestamp(&pair.first.created_at),
            file_2: pair.second.path.display().to_string(),
            created_at_2: format_timestamp(&pair.second.created_at),
        }
    }
}
