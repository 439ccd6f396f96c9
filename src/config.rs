//! Application configuration.
//!
//! The configuration is an optional JSON file at
//! `$XDG_CONFIG_HOME/winfocus/config.json`.  Command-line arguments take
//! precedence over anything set here.
//!
//! # Example
//!
//! ```json
//! {
//!   "min_distance": 80,
//!   "skip_states": ["_NET_WM_STATE_HIDDEN"]
//! }
//! ```

use crate::command::MIN_DISTANCE_DEFAULT;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snap threshold used when none is given on the command line.
    pub min_distance: u32,
    /// Extra `_NET_WM_STATE` atoms that exclude a window from navigation.
    /// Windows flagged `_NET_WM_STATE_SKIP_PAGER` are always excluded.
    pub skip_states: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_distance: MIN_DISTANCE_DEFAULT,
            skip_states: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Load the file at `path`, or fall back to the defaults.
    ///
    /// A missing file is normal and only logged at debug level.  A file that
    /// exists but cannot be read or parsed is reported with a warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("no config location, using defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!("{} does not exist, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

/// Where the config file lives: `$XDG_CONFIG_HOME/winfocus/config.json`,
/// or `$HOME/.config/winfocus/config.json` when `XDG_CONFIG_HOME` is unset or
/// empty.  `None` when neither variable is set.
pub fn config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("winfocus").join("config.json"))
}
