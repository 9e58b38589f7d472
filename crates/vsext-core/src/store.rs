//! Manifest files on disk
//!
//! [`ManifestStore`] owns the output directory that exports are written to.
//! Export names are bare filenames resolved inside that directory;
//! [`validate_filename`] rejects anything that could point elsewhere.
//!
//! Imports read a manifest from wherever the user keeps it: the argument is
//! a path relative to the working directory, checked by
//! [`validate_import_path`] and loaded with [`read_manifest`].

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::{Manifest, ManifestFormat};

/// Output directory used when none is configured (relative to the working
/// directory).
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Reject names containing `..`, `/` or `\`, the empty name and `.`.
///
/// Returns the input unchanged when it is acceptable.
pub fn validate_filename(name: &str) -> Result<&str> {
    if name.contains('/') || name.contains('\\') {
        return Err(invalid_filename(name));
    }
    validate_import_path(name)?;
    Ok(name)
}

/// Check a manifest path given to `import`.
///
/// Subdirectories (`exports/list.json`) and absolute paths are accepted;
/// names containing `..` or `\`, the empty name and `.` are not.
pub fn validate_import_path(path: &str) -> Result<&Path> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "." || path.contains("..") || path.contains('\\') {
        return Err(invalid_filename(path));
    }
    Ok(Path::new(path))
}

fn invalid_filename(name: &str) -> Error {
    Error::InvalidFilename {
        name: name.to_string(),
    }
}

/// Read and decode the manifest at `path`.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Manifest::decode(&content)
}

/// `vscode-extensions-<unix millis>.json`
pub fn default_export_filename() -> String {
    format!(
        "vscode-extensions-{}.json",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Writes manifests into one output directory.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    output_dir: PathBuf,
}

impl ManifestStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validate `name` and join it onto the output directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let name = validate_filename(name)?;
        Ok(self.output_dir.join(name))
    }

    pub fn output_dir_exists(&self) -> bool {
        self.output_dir.is_dir()
    }

    /// Create the output directory (and parents) if missing.
    ///
    /// Returns `true` when the directory had to be created.
    pub fn ensure_output_dir(&self) -> Result<bool> {
        if self.output_dir_exists() {
            return Ok(false);
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))?;
        tracing::debug!(dir = %self.output_dir.display(), "created output directory");
        Ok(true)
    }

    /// Encode and atomically write a manifest, creating the output directory
    /// if needed. Returns the written path.
    pub fn write(&self, name: &str, manifest: &Manifest, format: ManifestFormat) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        let content = manifest.encode(format)?;
        self.ensure_output_dir()?;
        write_atomic(&path, content.as_bytes())?;
        Ok(path)
    }
}

/// Write to a temporary sibling, then rename over `path`.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let result = (|| {
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;
        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;
        temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
