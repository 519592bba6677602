//! Recursive file enumeration using walkdir.
//!
//! # Overview
//!
//! [`FileEnumerator`] produces the paths of every regular file under a root
//! directory in traversal order. Directory entries within one directory are
//! visited sorted by file name, so two runs over an unchanged tree yield the
//! same sequence.
//!
//! Symbolic links are not followed and are not reported as files.
//!
//! Any traversal failure is fatal: a partially enumerated tree would silently
//! produce an incomplete catalog, so the whole enumeration returns
//! [`ScanError`] instead.
//!
//! # Example
//!
//! ```no_run
//! use file_catalog::scanner::FileEnumerator;
//! use std::path::Path;
//!
//! let files = FileEnumerator::new(Path::new("/storage")).enumerate().unwrap();
//! println!("Found {} files", files.len());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::Level;
use walkdir::WalkDir;

use super::ScanError;
use crate::logging::{default_sink, LogSink};

/// Recursive enumerator of regular files under a root directory.
pub struct FileEnumerator {
    /// Root path to walk
    root: PathBuf,
    /// Diagnostics destination
    log: Arc<dyn LogSink>,
}

impl std::fmt::Debug for FileEnumerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEnumerator")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl FileEnumerator {
    /// Create an enumerator for the given root directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            log: default_sink(),
        }
    }

    /// Route diagnostics to `sink` instead of the `log` facade.
    #[must_use]
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log = sink;
        self
    }

    /// Root directory being enumerated.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every regular file beneath the root.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root is missing, unreadable or not a
    /// directory, or if any directory below it cannot be read.
    pub fn enumerate(&self) -> Result<Vec<PathBuf>, ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| ScanError::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| self.walk_error(e))?;
            let file_type = entry.file_type();

            if file_type.is_file() {
                files.push(entry.into_path());
            } else if file_type.is_symlink() {
                self.log.log(
                    Level::Trace,
                    &format!("Skipping symlink: {}", entry.path().display()),
                );
            }
        }

        self.log.log(
            Level::Debug,
            &format!("Found {} files under {}", files.len(), self.root.display()),
        );
        Ok(files)
    }

    /// Convert a walkdir error into a [`ScanError`] naming the failing path.
    fn walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error.path().unwrap_or(self.root.as_path()).to_path_buf();
        self.log.log(
            Level::Debug,
            &format!("Traversal failed at {}: {}", path.display(), error),
        );

        match error.into_io_error() {
            Some(source) => ScanError::from_io(&path, source),
            None => ScanError::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }
}
