//! Plain-text output for the `show` and `dupes` commands.

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use super::format_timestamp;
use crate::catalog::{Catalog, CatalogEntry};
use crate::duplicates::{DuplicatePair, DuplicateSummary};

/// Column widths of the pair table.
pub const PAIR_COLUMN_WIDTHS: [usize; 5] = [64, 30, 25, 30, 25];

const PAIR_HEADER: [&str; 5] = ["Hash", "First File", "Created At", "Second File", "Created At"];

/// Format one catalog entry as a single `show` line.
#[must_use]
pub fn entry_line(entry: &CatalogEntry) -> String {
    format!(
        "File: {}, Hash: {}, Size: {} bytes, Created At: {}, Created By: {}, \
         Last Modified: {}, Modified By: {}, Last Accessed: {}, Accessed By: {}",
        entry.path.display(),
        entry.fingerprint,
        entry.size,
        format_timestamp(&entry.created_at),
        CatalogEntry::owner_label(&entry.created_by),
        format_timestamp(&entry.last_modified),
        CatalogEntry::owner_label(&entry.modified_by),
        format_timestamp(&entry.last_accessed),
        CatalogEntry::owner_label(&entry.accessed_by),
    )
}

/// Write one line per entry, in catalog order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_entries<W: Write>(writer: &mut W, catalog: &Catalog) -> io::Result<()> {
    for entry in catalog {
        writeln!(writer, "{}", entry_line(entry))?;
    }
    Ok(())
}

/// Fixed-width table of duplicate pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairTable {
    color: bool,
}

impl PairTable {
    /// Create a table writer; `color` enables a bold header.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Write the header row followed by one row per pair.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pairs: &[DuplicatePair<'_>]) -> io::Result<()> {
        let header = row(PAIR_HEADER);
        if self.color {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{header}")?;
        }

        for pair in pairs {
            let first_created = format_timestamp(&pair.first.created_at);
            let second_created = format_timestamp(&pair.second.created_at);
            let first_path = pair.first.path.display().to_string();
            let second_path = pair.second.path.display().to_string();
            writeln!(
                writer,
                "{}",
                row([
                    pair.fingerprint.as_str(),
                    &first_path,
                    &first_created,
                    &second_path,
                    &second_created,
                ])
            )?;
        }
        Ok(())
    }
}

/// Left-align each cell to its column width, separated by one space.
fn row(cells: [&str; 5]) -> String {
    cells
        .iter()
        .zip(PAIR_COLUMN_WIDTHS)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line description of a duplicate summary.
#[must_use]
pub fn summary_line(summary: &DuplicateSummary) -> String {
    if !summary.has_duplicates() {
        return format!("No duplicates among {} entries", summary.total_entries);
    }
    format!(
        "{} duplicate pairs in {} groups ({} redundant copies, {} reclaimable)",
        summary.duplicate_pairs,
        summary.duplicate_groups,
        summary.duplicate_files,
        ByteSize::b(summary.reclaimable_bytes)
    )
}
