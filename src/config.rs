//! Haul configuration.
//!
//! Loaded from `~/.haul/config.toml` unless another path is given.
//! Every key is optional; a missing default file means default settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::ActivityType;

/// Entries kept by the activity cache when `cache-capacity` is not set.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Haul configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Evaluate eligibility for the driver's app instead of the back office.
    pub for_trucker: bool,

    /// Activity types left out of every derivation.
    /// `--omit` adds to this list.
    pub omit: Vec<ActivityType>,

    /// Derivations kept in memory per run. `0` disables caching.
    pub cache_capacity: usize,

    /// Log filter directive (e.g. `"debug"` or `"haul=trace"`).
    /// The `HAUL_LOG` environment variable takes precedence.
    pub log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            for_trucker: false,
            omit: Vec::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            log: None,
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from `~/.haul/config.toml`.
    ///
    /// An explicit path must exist. The default path may be missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(format!("no config file found at {}", path.display()));
                }
                path.to_path_buf()
            }
            None => match Self::path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.haul/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".haul").join("config.toml"))
    }
}
