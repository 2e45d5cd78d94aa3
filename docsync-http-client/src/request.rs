//! Request builder.

use crate::{HttpClient, HttpClientError, Response, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

/// HTTP request builder.
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    error: Option<HttpClientError>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a HttpClient, method: Method, url: String) -> Self {
        Self {
            client,
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            error: None,
        }
    }

    /// Add a header to the request.
    ///
    /// An invalid name or value fails the request when it is sent.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = HeaderName::try_from(name.as_ref());
        let value = HeaderValue::try_from(value.as_ref());
        match (name, value) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(e), _) => self.fail(HttpClientError::RequestBuild(e.to_string())),
            (_, Err(e)) => self.fail(HttpClientError::RequestBuild(e.to_string())),
        }
        self
    }

    /// Add every pair as a header.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (k, v) in headers {
            self = self.header(k, v);
        }
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                self.body = Some(bytes);
            }
            Err(e) => self.fail(HttpClientError::Json(e.to_string())),
        }
        self
    }

    /// Set the request body as form data.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                self.body = Some(encoded.into_bytes());
            }
            Err(e) => self.fail(HttpClientError::RequestBuild(e.to_string())),
        }
        self
    }

    /// Set bearer authentication.
    pub fn bearer_auth(self, token: impl std::fmt::Display) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    fn fail(&mut self, error: HttpClientError) {
        self.error.get_or_insert(error);
    }

    /// Build the URL with query parameters.
    fn build_url(&self) -> Result<url::Url> {
        let mut url =
            url::Url::parse(&self.url).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

        if !self.query.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Send the request.
    pub async fn send(self) -> Result<Response> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let url = self.build_url()?;

        let mut request = self
            .client
            .request_builder(self.method.clone(), url)
            .headers(self.headers);

        if let Some(body) = self.body {
            request = request.body(body);
        }

        self.client.execute(request.build()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_header_fails_on_send() {
        let client = HttpClient::default_client().unwrap();
        let result = client
            .get("http://127.0.0.1:1/")
            .header("bad header", "value")
            .send()
            .await;

        assert!(matches!(result, Err(HttpClientError::RequestBuild(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_on_send() {
        let client = HttpClient::default_client().unwrap();
        let result = client.get("not a url").send().await;

        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_query_is_appended() {
        let client = HttpClient::default_client().unwrap();

        let url = client
            .get("https://api.apifox.com/api/v1/projects/1/api-folders")
            .query("locale", "zh-CN")
            .build_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.apifox.com/api/v1/projects/1/api-folders?locale=zh-CN"
        );
    }
}
