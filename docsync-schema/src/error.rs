//! Schema inference error types.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema inference errors.
///
/// Everything here is a configuration problem: the caller's types cannot be
/// documented correctly, so no document is produced.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A map is keyed by something other than a string.
    #[error("map `{map}` is keyed by `{key}`, only string keys can be documented")]
    NonStringMapKey {
        /// Identity of the map type.
        map: String,
        /// Identity of the key type.
        key: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
