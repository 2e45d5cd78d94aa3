//! The transport seam used by the sync orchestrator.
//!
//! Every call returns the raw response body of a 2xx response. Anything else
//! is an error, including non-2xx statuses.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{HttpClient, Result};

/// Header name/value pairs sent with a single call.
pub type HeaderPairs = [(String, String)];

/// Minimal HTTP surface needed to talk to a documentation platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`.
    async fn get(&self, url: &str, headers: &HeaderPairs) -> Result<Bytes>;

    /// POST `params` as `application/x-www-form-urlencoded`.
    async fn post_form(
        &self,
        url: &str,
        params: &[(String, String)],
        headers: &HeaderPairs,
    ) -> Result<Bytes>;

    /// POST `body` as `application/json`.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HeaderPairs,
    ) -> Result<Bytes>;
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, headers: &HeaderPairs) -> Result<Bytes> {
        debug!(url, "GET");
        let response = HttpClient::get(self, url)
            .headers(headers.iter().map(|(k, v)| (k, v)))
            .send()
            .await?;
        Ok(response.error_for_status()?.into_bytes())
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(String, String)],
        headers: &HeaderPairs,
    ) -> Result<Bytes> {
        debug!(url, fields = params.len(), "POST form");
        let response = self
            .post(url)
            .headers(headers.iter().map(|(k, v)| (k, v)))
            .form(params)
            .send()
            .await?;
        Ok(response.error_for_status()?.into_bytes())
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &HeaderPairs,
    ) -> Result<Bytes> {
        debug!(url, "POST json");
        let response = self
            .post(url)
            .headers(headers.iter().map(|(k, v)| (k, v)))
            .json(body)
            .send()
            .await?;
        Ok(response.error_for_status()?.into_bytes())
    }
}
