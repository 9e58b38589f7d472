//! Per-user default configuration
//!
//! An optional JSON object at `~/.vscode-ext-config.json`:
//!
//! ```json
//! { "quiet": false, "dryRun": false, "exact": true, "concurrency": 4 }
//! ```
//!
//! Every key is optional and unknown keys are ignored. Boolean keys are OR-ed
//! with the matching command-line flags; the others are used when no flag is
//! given.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Name of the config file inside the home directory.
pub const CONFIG_FILENAME: &str = ".vscode-ext-config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub quiet: bool,
    pub dry_run: bool,
    pub exact: bool,
    pub output_dir: Option<PathBuf>,
    /// Editor executable, e.g. `code-insiders`.
    pub editor: Option<String>,
    pub concurrency: Option<NonZeroUsize>,
}

impl Config {
    /// `~/.vscode-ext-config.json`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILENAME))
    }

    /// Parse a config document. The top level must be a JSON object.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("config must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Load the config at `path`.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse is an [`Error::ConfigParse`]; callers decide whether to fall back.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::parse(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
