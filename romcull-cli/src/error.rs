use thiserror::Error;

use romcull_lib::{ConfigError, MoveError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Collections file or clone list could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Output collection could not be written
    #[error("{0}")]
    Move(#[from] MoveError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
