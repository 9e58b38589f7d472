//! Effective settings: command-line flags merged over the config file
//!
//! Boolean switches are OR-ed (a flag can turn a setting on, never off).
//! Valued settings take the flag, then the config value, then the built-in
//! default.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use vsext_core::{Config, DEFAULT_CONCURRENCY, DEFAULT_EDITOR, DEFAULT_OUTPUT_DIR};

use crate::cli::Cli;
use crate::output::Reporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub quiet: bool,
    pub dry_run: bool,
    pub exact: bool,
    pub editor: String,
    pub output_dir: PathBuf,
    pub concurrency: NonZeroUsize,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            quiet: cli.quiet || config.quiet,
            dry_run: cli.dry_run || config.dry_run,
            exact: config.exact,
            editor: cli
                .editor
                .clone()
                .or_else(|| config.editor.clone())
                .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            output_dir: cli
                .output_dir
                .clone()
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            concurrency: config.concurrency.unwrap_or(DEFAULT_CONCURRENCY),
        }
    }
}

/// Load the config at `path`, or the per-user default when `path` is `None`.
///
/// A malformed file is reported as a warning and replaced by the defaults.
pub fn load_config(path: Option<&Path>, reporter: &Reporter) -> Config {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match Config::default_path() {
            Some(path) => path,
            None => {
                tracing::debug!("no home directory; using default config");
                return Config::default();
            }
        },
    };

    match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            reporter.warning(format!("Invalid config file, using defaults ({e})"));
            Config::default()
        }
    }
}
