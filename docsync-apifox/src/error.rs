//! Sync error types.

use docsync_http_client::HttpClientError;
use docsync_schema::SchemaError;
use thiserror::Error;

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Everything that can abort a sync.
///
/// All variants are fatal. Nothing is retried and folders created before the
/// failure are left in place.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The API list handed to `sync` was empty.
    #[error("No APIs to document")]
    NoApis,

    /// The request has no project id.
    #[error("Missing project id")]
    MissingProjectId,

    /// The request has no access token.
    #[error("Missing access token")]
    MissingAccessToken,

    /// Schema inference or document export failed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The transport could not complete a call.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// The remote envelope carried `success: false`.
    #[error("Apifox rejected {operation}: {body}")]
    Rejected {
        /// Which call was rejected.
        operation: &'static str,
        /// Raw response body.
        body: String,
    },

    /// A successful envelope had no `data`.
    #[error("Apifox returned no data for {operation}")]
    MissingData {
        /// Which call returned nothing.
        operation: &'static str,
    },

    /// A response body could not be decoded.
    #[error("Unexpected response for {operation}: {source}")]
    Decode {
        /// Which call returned the body.
        operation: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A create step referenced a folder that was never created.
    #[error("Folder `{name}` has no resolved parent")]
    UnresolvedParent {
        /// Name of the folder being created.
        name: String,
    },

    /// The document to import is not valid JSON.
    #[error("Invalid document: {0}")]
    Document(#[source] serde_json::Error),

    /// Encoding a request body failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a document from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// True when the error was detected before any network call.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::NoApis | Self::MissingProjectId | Self::MissingAccessToken | Self::Schema(_)
        )
    }
}

/// An overwrite mode string that names no known mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown overwrite mode `{0}`")]
pub struct ParseModeError(pub String);
