//! Catalog entry definitions.
//!
//! A [`CatalogEntry`] is the immutable record kept for one hashed file. Its
//! serialized form is the nine-key JSON object of the catalog file:
//!
//! | key             | field           |
//! |-----------------|-----------------|
//! | `file_name`     | `path`          |
//! | `hash`          | `fingerprint`   |
//! | `file_size`     | `size`          |
//! | `created_at`    | `created_at`    |
//! | `created_by`    | `created_by`    |
//! | `last_modified` | `last_modified` |
//! | `modified_by`   | `modified_by`   |
//! | `last_accessed` | `last_accessed` |
//! | `accessed_by`   | `accessed_by`   |
//!
//! Ownership is never resolved; the `*_by` fields are `None` in memory and
//! [`UNKNOWN_OWNER`] on disk.

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

/// Wire value for an unresolved owner.
pub const UNKNOWN_OWNER: &str = "unknown";

/// Timestamp stored in catalog entries, second precision with UTC offset.
pub type Timestamp = DateTime<FixedOffset>;

/// Convert a filesystem time into a catalog timestamp.
///
/// The result is in the local time zone and truncated to whole seconds, the
/// precision the catalog file keeps. Returns `None` for times chrono cannot
/// represent.
#[must_use]
pub fn timestamp_from_system_time(time: SystemTime) -> Option<Timestamp> {
    let secs = match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).ok()?,
        Err(before) => {
            // Floor to the whole second.
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).ok()?;
            if before.subsec_nanos() > 0 {
                whole.checked_add(1)?.checked_neg()?
            } else {
                whole.checked_neg()?
            }
        }
    };
    let utc = DateTime::from_timestamp(secs, 0)?;
    Some(utc.with_timezone(&Local).fixed_offset())
}

/// Hex-encoded content digest used as the duplicate-detection key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length in hex characters of fingerprints produced by this build.
    pub const HEX_LEN: usize = 64;

    /// The digest as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(hex: String) -> Self {
        Self(hex)
    }
}

impl From<&str> for Fingerprint {
    fn from(hex: &str) -> Self {
        Self(hex.to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata recorded for one successfully hashed file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Path of the file as enumerated
    #[serde(rename = "file_name")]
    pub path: PathBuf,
    /// Content fingerprint
    #[serde(rename = "hash")]
    pub fingerprint: Fingerprint,
    /// Size in bytes at hash time
    #[serde(rename = "file_size")]
    pub size: u64,
    /// Creation time (falls back to modification time, see [`crate::scanner::metadata`])
    #[serde(with = "rfc3339")]
    pub created_at: Timestamp,
    /// Creator, unresolved
    #[serde(with = "owner")]
    pub created_by: Option<String>,
    /// Last modification time
    #[serde(with = "rfc3339")]
    pub last_modified: Timestamp,
    /// Last modifier, unresolved
    #[serde(with = "owner")]
    pub modified_by: Option<String>,
    /// Last access time, mirrors `last_modified`
    #[serde(with = "rfc3339")]
    pub last_accessed: Timestamp,
    /// Last accessor, unresolved
    #[serde(with = "owner")]
    pub accessed_by: Option<String>,
}

impl CatalogEntry {
    /// Create an entry with unresolved ownership and an access time equal to
    /// the modification time.
    #[must_use]
    pub fn new(
        path: PathBuf,
        fingerprint: Fingerprint,
        size: u64,
        created_at: Timestamp,
        last_modified: Timestamp,
    ) -> Self {
        Self {
            path,
            fingerprint,
            size,
            created_at,
            created_by: None,
            last_modified,
            modified_by: None,
            last_accessed: last_modified,
            accessed_by: None,
        }
    }

    /// Owner value as written to the catalog file.
    #[must_use]
    pub fn owner_label(owner: &Option<String>) -> &str {
        owner.as_deref().unwrap_or(UNKNOWN_OWNER)
    }
}

/// RFC 3339 timestamps with second precision.
mod rfc3339 {
    use chrono::{DateTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}

/// Ownership fields: `None` <-> `"unknown"`.
mod owner {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::UNKNOWN_OWNER;

    pub fn serialize<S: Serializer>(
        owner: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(owner.as_deref().unwrap_or(UNKNOWN_OWNER))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok((raw != UNKNOWN_OWNER).then_some(raw))
    }
}
