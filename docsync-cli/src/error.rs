//! Error types for the docsync CLI.

use docsync_apifox::SyncError;
use docsync_schema::SchemaError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file or environment problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// The document could not be read or written
    #[error("Document error: {0}")]
    Document(#[from] SchemaError),

    /// The sync failed
    #[error("{0}")]
    Sync(#[from] SyncError),
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}
