//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping catalog entries by fingerprint
//! - Enumerating every unordered pair within a group
//! - Summarizing redundant copies and reclaimable space

pub mod detector;
pub mod groups;

pub use detector::{find_duplicate_groups, find_duplicates, DuplicateReport, PairRecord};
pub use groups::{group_by_fingerprint, DuplicateGroup, DuplicatePair, DuplicateSummary};
