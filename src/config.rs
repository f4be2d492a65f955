use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::CategoryTable;
use crate::error::ConfigError;
use crate::style::Palette;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "ledgerfmt.json";

/// Colour tables shared by both layouts.
///
/// ```json
/// {
///   "palette": { "buy": "#b7e1cd", "sell": "#f4c7c3", "highlight": "#fce8b2" },
///   "exchanges": {
///     "mode": "suffix",
///     "categories": [
///       { "name": "robinhood", "background": "#38761d", "fontColor": "white" },
///       { "name": "total", "background": "#fce8b2", "fontColor": "black", "bold": true }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub palette: Palette,
    pub exchanges: CategoryTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            exchanges: CategoryTable::exchanges(),
        }
    }
}

impl Config {
    /// Reads `path` when given; otherwise [`DEFAULT_CONFIG_FILE`] if it exists,
    /// falling back to the built-in tables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::read(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }
}
