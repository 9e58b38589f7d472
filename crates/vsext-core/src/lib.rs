//! Core library for vscode-ext
//!
//! Exports, imports and lists editor extensions by driving the editor's own
//! command line. This crate holds everything except the terminal front end:
//!
//! - **Records & manifests**: [`ExtensionRecord`], [`Manifest`] and its JSON codec
//! - **Editor adapter**: the [`EditorCli`] seam and the process-backed [`CodeCli`]
//! - **Manifest store**: filename validation, atomic manifest files in an
//!   explicit output directory, and reading manifests for import
//! - **Batch installer**: chunked installs with a fixed concurrency window
//! - **Config**: the optional per-user defaults file
//!
//! Nothing here prints or exits the process. Failures are returned as
//! [`Error`]; installer progress is delivered to an [`InstallObserver`].

pub mod config;
pub mod editor;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod record;
pub mod store;

pub use config::{CONFIG_FILENAME, Config};
pub use editor::{CodeCli, DEFAULT_EDITOR, EditorCli, ListQuery, installed_extensions};
pub use error::{Error, Result};
pub use installer::{
    BatchInstaller, DEFAULT_CONCURRENCY, InstallAction, InstallEvent, InstallObserver,
    InstallOptions, NoopObserver,
};
pub use manifest::{Manifest, ManifestFormat};
pub use record::ExtensionRecord;
pub use store::{
    DEFAULT_OUTPUT_DIR, ManifestStore, default_export_filename, read_manifest, validate_filename,
    validate_import_path,
};
