//! Error types for vsext-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from vsext-core
    #[error(transparent)]
    Core(#[from] vsext_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The user declined to continue. Not a failure, but still exits non-zero.
    #[error("{message}")]
    Cancelled { message: String },

    /// Arguments could not be parsed; clap renders its own diagnostic.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// No command was given.
    #[error("no command given")]
    MissingCommand,
}

impl CliError {
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }
}
