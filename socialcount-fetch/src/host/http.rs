//! HTTP transport for source clients.
//!
//! Wraps a reqwest client bound to one source origin. Non-success statuses
//! are surfaced as [`RawResponse`]s so the retry layer can classify them.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{FetchError, TransportError};
use crate::transport::{Fetcher, RawResponse};

/// Default per-attempt timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent string for SocialCount.
const USER_AGENT: &str = concat!("SocialCount/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client bound to one source origin.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    base_url: Url,
}

impl HttpClient {
    /// Creates a client for `base_url` with the given per-attempt timeout
    /// and default headers.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        headers: &HashMap<String, String>,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(header_map(headers)?)
            .build()
            .map_err(|e| FetchError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: client,
            base_url,
        })
    }

    /// Returns the origin requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request target against the origin.
    ///
    /// Targets that resolve to another scheme, host or port are rejected.
    pub fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("{path}: {e}")))?;

        if url.origin() != self.base_url.origin() {
            return Err(TransportError::InvalidUrl(format!(
                "{path}: leaves origin {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Performs a GET request and reads the body as text.
    #[instrument(skip(self), fields(origin = %self.base_url))]
    pub async fn get(&self, path: &str) -> Result<RawResponse, TransportError> {
        let url = self.resolve(path)?;
        debug!(url = %url, "GET request");

        let response = self.inner.get(url).send().await?;
        let status = response.status().as_u16();
        let retry_after = response.retry_after();
        debug!(status, "Response received");

        let body = response.text().await?;
        let mut raw = RawResponse::new(status, body);
        raw.retry_after = retry_after;
        Ok(raw)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, path: &str) -> Result<RawResponse, TransportError> {
        self.get(path).await
    }
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::Config(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::Config(format!("invalid value for header '{name}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Get the Retry-After header value, if given in seconds.
    fn retry_after(&self) -> Option<Duration>;
}

impl ResponseExt for Response {
    fn retry_after(&self) -> Option<Duration> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(&server.base_url(), DEFAULT_REQUEST_TIMEOUT, &HashMap::new()).unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpClient::new("not a url", DEFAULT_REQUEST_TIMEOUT, &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
    }

    #[test]
    fn test_invalid_header() {
        let headers = HashMap::from([("bad header".to_string(), "x".to_string())]);
        let err = HttpClient::new("https://example.com", DEFAULT_REQUEST_TIMEOUT, &headers)
            .unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
    }

    #[test]
    fn test_resolve_keeps_origin() {
        let client =
            HttpClient::new("https://www.youtube.com", DEFAULT_REQUEST_TIMEOUT, &HashMap::new())
                .unwrap();
        assert_eq!(
            client.resolve("/@someone").unwrap().as_str(),
            "https://www.youtube.com/@someone"
        );
    }

    #[test]
    fn test_resolve_rejects_other_origins() {
        let client =
            HttpClient::new("https://www.instagram.com", DEFAULT_REQUEST_TIMEOUT, &HashMap::new())
                .unwrap();

        for target in ["//evil.example/", "https://evil.example/x", "http://www.instagram.com/x"] {
            let err = client.resolve(target).unwrap_err();
            assert!(matches!(err, TransportError::InvalidUrl(_)), "{target}: {err}");
        }
    }

    #[tokio::test]
    async fn test_get_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/@someone");
                then.status(200).body("<html>profile</html>");
            })
            .await;

        let response = client_for(&server).fetch("/@someone").await.unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.body, "<html>profile</html>");
        assert_eq!(response.retry_after, None);
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/limited");
                then.status(429).header("Retry-After", "7");
            })
            .await;

        let response = client_for(&server).fetch("/limited").await.unwrap();

        assert_eq!(response.status, 429);
        assert_eq!(response.retry_after, Some(Duration::from_secs(7)));
    }

    #[tokio::test]
    async fn test_sends_configured_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/page")
                    .header("accept-language", "en-US");
                then.status(200).body("ok");
            })
            .await;
        let headers = HashMap::from([("Accept-Language".to_string(), "en-US".to_string())]);
        let client = HttpClient::new(&server.base_url(), DEFAULT_REQUEST_TIMEOUT, &headers).unwrap();

        let response = client.fetch("/page").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.body, "ok");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client =
            HttpClient::new("http://127.0.0.1:1", Duration::from_secs(2), &HashMap::new())
                .unwrap();

        let err = client.fetch("/").await.unwrap_err();

        assert!(err.is_retryable());
    }
}
