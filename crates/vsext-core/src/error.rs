//! Error types for vsext-core

use std::path::PathBuf;

/// Result type for vsext-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vsext-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filename is empty or could escape the output directory.
    #[error("invalid filename or path \"{name}\"")]
    InvalidFilename { name: String },

    /// Manifest file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Manifest is not valid JSON or not an array of extension entries.
    #[error("invalid manifest: {reason}")]
    InvalidManifest { reason: String },

    /// The editor binary could not be resolved on PATH.
    #[error("editor CLI '{program}' not found. Is VS Code installed and in your PATH?")]
    EditorNotFound { program: String },

    /// Listing installed extensions failed.
    #[error("failed to list extensions: `{command}` exited with {}{}", exit_label(.exit_code), stderr_suffix(.stderr))]
    ListFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// An install or disable invocation exited unsuccessfully.
    #[error("`{command}` exited with {}", exit_label(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// The config file exists but is not a valid config object.
    #[error("failed to parse config at {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_manifest(reason: impl Into<String>) -> Self {
        Self::InvalidManifest {
            reason: reason.into(),
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
