//! The raw transport capability source clients fetch through.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::TransportError;

/// A response that reached the HTTP layer, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
    /// Server-requested delay before retrying, if any.
    pub retry_after: Option<Duration>,
}

impl RawResponse {
    /// Creates a response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    /// Sets the retry-after hint.
    #[must_use]
    pub fn with_retry_after(mut self, delay: Duration) -> Self {
        self.retry_after = Some(delay);
        self
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves raw content for a request target relative to a source's origin.
///
/// Cancellation is applied by dropping the returned future; implementations
/// must not hold state that outlives it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `path` and returns the response, or a transport failure.
    ///
    /// Non-success statuses are returned as responses, not errors.
    async fn fetch(&self, path: &str) -> Result<RawResponse, TransportError>;
}
