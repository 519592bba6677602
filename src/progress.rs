//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements [`ProgressCallback`]
//! to draw a hashing progress bar in the terminal.
//!
//! Progress is observational only: the percentage reported is the share of
//! enumerated paths that produced an entry so far, and it never decreases.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for a hashing run.
///
/// Implement this trait to receive progress updates from
/// [`HashingPipeline`](crate::pipeline::HashingPipeline).
pub trait ProgressCallback: Send + Sync {
    /// Called once before any entry is produced.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of paths submitted to the pipeline
    fn on_start(&self, total: usize);

    /// Called each time an entry is produced.
    ///
    /// # Arguments
    ///
    /// * `produced` - Entries produced so far (1-based)
    /// * `total` - Number of paths submitted
    /// * `path` - Path of the entry just produced
    fn on_entry(&self, produced: usize, total: usize, path: &Path);

    /// Called once after the result stream has closed.
    fn on_finish(&self, _produced: usize, _failed: usize) {}
}

/// Percentage of `total` paths that produced an entry.
///
/// An empty run counts as complete.
#[must_use]
pub fn completion_percent(produced: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    produced as f64 / total as f64 * 100.0
}

/// Progress reporter using indicatif.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bar will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use file_catalog::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    /// Check if the reporter suppresses output.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_start(&self, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.set_message("Hashing");
        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_entry(&self, produced: usize, total: usize, path: &Path) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.bar.lock().unwrap_or_else(PoisonError::into_inner) {
            pb.set_position(produced as u64);
            pb.set_message(format!(
                "{:.2}% {}",
                completion_percent(produced, total),
                truncate_path(&path.to_string_lossy(), 30)
            ));
        }
    }

    fn on_finish(&self, produced: usize, failed: usize) {
        if self.quiet {
            return;
        }

        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_with_message(format!("{produced} hashed, {failed} failed"));
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len >= max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
