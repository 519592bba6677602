//! Streaming content hasher.
//!
//! # Overview
//! This module provides the [`ContentHasher`] struct for computing content
//! fingerprints of files with a bounded read buffer, so file size never
//! dictates memory use.
//!
//! The hash function is fixed when the crate is built: SHA-256 by default,
//! BLAKE3 when the `blake3` feature is enabled. Both render as 64 lowercase
//! hex characters.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::catalog::Fingerprint;

use super::HashError;

/// Read buffer size used when streaming file content (64 KiB).
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Name of the hash function compiled into this build.
#[cfg(not(feature = "blake3"))]
pub const ALGORITHM: &str = "sha256";

/// Name of the hash function compiled into this build.
#[cfg(feature = "blake3")]
pub const ALGORITHM: &str = "blake3";

#[cfg(not(feature = "blake3"))]
struct StreamDigest(sha2::Sha256);

#[cfg(not(feature = "blake3"))]
impl StreamDigest {
    fn new() -> Self {
        use sha2::Digest;
        Self(sha2::Sha256::new())
    }

    fn update(&mut self, bytes: &[u8]) {
        use sha2::Digest;
        self.0.update(bytes);
    }

    fn finish(self) -> Fingerprint {
        use sha2::Digest;
        Fingerprint::from(format!("{:x}", self.0.finalize()))
    }
}

#[cfg(feature = "blake3")]
struct StreamDigest(blake3::Hasher);

#[cfg(feature = "blake3")]
impl StreamDigest {
    fn new() -> Self {
        Self(blake3::Hasher::new())
    }

    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(self) -> Fingerprint {
        Fingerprint::from(self.0.finalize().to_hex().to_string())
    }
}

/// Computes content fingerprints by streaming bytes through the hash function.
#[derive(Debug, Clone)]
pub struct ContentHasher {
    buffer_size: usize,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher {
    /// Create a hasher with the default 64 KiB buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Create a hasher with a custom read buffer size (minimum 1 byte).
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Size of the read buffer in bytes.
    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Name of the hash function in use.
    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    /// Hash the full content of the file at `path`.
    ///
    /// The file handle is closed when this returns, whether hashing succeeded
    /// or not.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] naming `path` if the file cannot be opened or a
    /// read fails part way through. Reads are not retried.
    pub fn hash(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(file).map_err(|e| HashError::from_io(path, e))
    }

    /// Hash everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates the first read error other than `Interrupted`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<Fingerprint> {
        let mut digest = StreamDigest::new();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => digest.update(&buffer[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(digest.finish())
    }
}
