//! Shared state handed to every command
//!
//! Commands never build their own editor, store or reporter; `main` resolves
//! settings once and lends them out through [`CommandContext`]. Tests swap in
//! a fake editor and a capturing reporter the same way.

use std::path::{Path, PathBuf};

use vsext_core::{EditorCli, ManifestStore};

use crate::output::Reporter;

pub struct CommandContext<'a> {
    pub editor: &'a dyn EditorCli,
    pub store: &'a ManifestStore,
    pub reporter: &'a Reporter,
    /// Replace every side effect with a `[DRY RUN]` line.
    pub dry_run: bool,
    /// Base for relative import paths. Empty means the process working
    /// directory.
    pub working_dir: PathBuf,
}

impl<'a> CommandContext<'a> {
    pub fn new(editor: &'a dyn EditorCli, store: &'a ManifestStore, reporter: &'a Reporter) -> Self {
        Self {
            editor,
            store,
            reporter,
            dry_run: false,
            working_dir: PathBuf::new(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }
}
