//! Settings loaded from `teamchess.toml`.
//!
//! Every field is optional. A missing file yields the defaults, and
//! command-line flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML for [`Settings`].
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Seed for the starting allocation. Unset means a fresh random split.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Write `~` after promoted pieces in extended FEN output.
    #[serde(default = "default_include_promoted")]
    pub include_promoted: bool,
    #[serde(default)]
    pub pretty_json: bool,
}

fn default_include_promoted() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            seed: None,
            include_promoted: default_include_promoted(),
            pretty_json: false,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// `teamchess.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("teamchess.toml")
    }
}
