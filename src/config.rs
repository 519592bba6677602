//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform configuration directory
//! 3. `FILE_CATALOG_*` environment variables
//! 4. `CPU_MULT_FACTOR`
//!
//! A layer that fails to parse is reported with a warning and the defaults
//! are used instead.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FILE_CATALOG_";

/// Unprefixed multiplier variable.
pub const CPU_MULT_FACTOR_VAR: &str = "CPU_MULT_FACTOR";

/// Default number of hashing workers per core.
pub const DEFAULT_CPU_MULT_FACTOR: usize = 10;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hashing workers per available core.
    pub cpu_mult_factor: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpu_mult_factor: DEFAULT_CPU_MULT_FACTOR,
        }
    }
}

impl Config {
    /// Load the configuration from every layer.
    ///
    /// Never fails: a broken layer is logged and the defaults are returned.
    #[must_use]
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::figment(path.as_deref()).extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Build the layered figment, reading `file` if it is given.
    ///
    /// A missing file is skipped.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&[CPU_MULT_FACTOR_VAR]))
    }

    /// Platform-specific path of `config.toml`, if a home directory exists.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "file-catalog").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Number of hashing workers for a machine with `cores` cores.
    ///
    /// Always at least one.
    #[must_use]
    pub fn worker_count(&self, cores: usize) -> usize {
        cores.max(1).saturating_mul(self.cpu_mult_factor).max(1)
    }
}

/// Number of cores available to this process.
#[must_use]
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
