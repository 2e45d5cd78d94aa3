//! HTTP response wrapper.

use crate::{HttpClientError, Result};
use bytes::Bytes;
use http::StatusCode;

/// Fully buffered HTTP response.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    body: Bytes,
}

impl Response {
    /// Buffer a reqwest response.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.bytes().await?;

        Ok(Self { status, body })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body as bytes.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| HttpClientError::Json(e.to_string()))
    }

    /// Turn any status outside 2xx into [`HttpClientError::Response`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            let message = self.text().unwrap_or_else(|_| "<binary body>".to_string());
            Err(HttpClientError::Response {
                status: self.status.as_u16(),
                message,
            })
        }
    }
}
