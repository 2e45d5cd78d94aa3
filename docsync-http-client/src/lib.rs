//! # docsync HTTP client
//!
//! A small reqwest-backed HTTP client plus the [`Transport`] seam the sync
//! orchestrator talks through.
//!
//! Requests are sent exactly once. There is no retry, backoff, or circuit
//! breaking: a failed call surfaces to the caller as an [`HttpClientError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docsync_http_client::{HttpClient, HttpClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(HttpClientConfig::default())?;
//!
//!     let response = client
//!         .get("https://api.example.com/folders")
//!         .bearer_auth("token")
//!         .send()
//!         .await?;
//!
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Through the transport seam
//!
//! ```rust,no_run
//! use docsync_http_client::{HttpClient, HttpClientConfig, Transport};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpClientConfig::builder()
//!         .timeout(Duration::from_secs(30))
//!         .build();
//!     let client = HttpClient::new(config)?;
//!
//!     let headers = vec![("Authorization".to_string(), "Bearer token".to_string())];
//!     let body = client
//!         .post_json(
//!             "https://api.example.com/import",
//!             &serde_json::json!({"importFormat": "openapi"}),
//!             &headers,
//!         )
//!         .await?;
//!
//!     println!("{} bytes", body.len());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod transport;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};
pub use request::RequestBuilder;
pub use response::Response;
pub use transport::{HeaderPairs, Transport};

// Re-export common types
pub use bytes::Bytes;
pub use http::{Method, StatusCode};

/// Prelude for common imports.
///
/// ```
/// use docsync_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::request::RequestBuilder;
    pub use crate::response::Response;
    pub use crate::transport::{HeaderPairs, Transport};
    pub use http::{Method, StatusCode};
}
