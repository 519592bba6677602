//! Scanner module for directory enumeration and per-file metadata.
//!
//! This module provides functionality for:
//! - Recursive enumeration of regular files under a root directory
//! - Streaming content fingerprints (SHA-256, or BLAKE3 with the `blake3` feature)
//! - Combining fingerprints with stat metadata into catalog entries
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Streaming content hashing
//! - [`metadata`]: Catalog entry extraction for a single file
//!
//! # Example
//!
//! ```no_run
//! use file_catalog::scanner::{FileEnumerator, MetadataExtractor};
//! use std::path::Path;
//!
//! let files = FileEnumerator::new(Path::new("/storage")).enumerate().unwrap();
//! let extractor = MetadataExtractor::new();
//! for path in &files {
//!     match extractor.extract(path) {
//!         Ok(entry) => println!("{} {}", entry.fingerprint, entry.path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod metadata;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{ContentHasher, ALGORITHM, BUFFER_SIZE};
pub use metadata::MetadataExtractor;
pub use walker::FileEnumerator;

/// Errors that make directory enumeration fail as a whole.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while traversing the tree.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while enumerating `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path) | Self::NotFound(path) | Self::NotADirectory(path) => {
                path
            }
            Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur while stat'ing or hashing a single file.
///
/// These never abort a hashing run; the pipeline reports them and skips
/// the file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file timestamp lies outside the representable date range.
    #[error("Timestamp out of range for {0}")]
    TimestampOutOfRange(PathBuf),
}

impl HashError {
    /// Classify an I/O error raised while processing `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The file the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) | Self::TimestampOutOfRange(path) => {
                path
            }
            Self::Io { path, .. } => path,
        }
    }
}
