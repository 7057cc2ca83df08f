//! Generic source client composed of a fetcher, a retry policy and an
//! extractor.

use async_trait::async_trait;
use socialcount_core::CountResult;
use std::sync::Arc;
use tracing::{debug, error};
use url::form_urlencoded;

use crate::cancel::CancelSignal;
use crate::error::FetchError;
use crate::extract::Extractor;
use crate::retry::{ResilientFetcher, RetryPolicy};
use crate::source::SourceClient;
use crate::transport::Fetcher;

/// Builds the request target for a handle, e.g. `someone` → `/@someone`.
pub type RouteFn = fn(&str) -> String;

/// Strips surrounding whitespace and one leading `@`.
pub fn normalize_handle(handle: &str) -> &str {
    let handle = handle.trim();
    handle.strip_prefix('@').unwrap_or(handle)
}

/// Percent-encodes a handle so it stays one path segment.
///
/// `/`, `?`, `#` and `%` are all escaped, so the segment cannot change the
/// host, the query or the directory a route points at.
pub fn path_segment(handle: &str) -> String {
    form_urlencoded::byte_serialize(handle.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// A [`SourceClient`] that fetches one page per handle and extracts the
/// count from its body.
pub struct CounterClient {
    platform: String,
    fetcher: Arc<dyn Fetcher>,
    retry: ResilientFetcher,
    extractor: Arc<dyn Extractor>,
    route: RouteFn,
}

impl CounterClient {
    /// Creates a client for `platform`.
    pub fn new(
        platform: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
        policy: RetryPolicy,
        extractor: Arc<dyn Extractor>,
        route: RouteFn,
    ) -> Self {
        let platform = platform.into();
        Self {
            retry: ResilientFetcher::new(platform.clone(), policy),
            platform,
            fetcher,
            extractor,
            route,
        }
    }

    /// Returns the request target for `handle`.
    pub fn target(&self, handle: &str) -> String {
        (self.route)(normalize_handle(handle))
    }

    /// Fetches and extracts the count, propagating any failure.
    pub async fn try_get_count(
        &self,
        handle: &str,
        cancel: &CancelSignal,
    ) -> Result<u64, FetchError> {
        let name = normalize_handle(handle);
        if name.is_empty() || name.bytes().all(|b| b == b'.') {
            return Err(FetchError::InvalidHandle(handle.to_string()));
        }

        let path = self.target(handle);
        debug!(platform = %self.platform, path = %path, "Fetching count");

        let outcome = self
            .retry
            .execute(cancel, || self.fetcher.fetch(&path))
            .await;
        debug!(
            platform = %self.platform,
            attempts = outcome.attempts,
            terminal = ?outcome.terminal,
            elapsed = ?outcome.elapsed,
            "Fetch finished"
        );

        let response = outcome.result?;
        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status,
            });
        }

        self.extractor.extract(&response.body, handle)
    }
}

#[async_trait]
impl SourceClient for CounterClient {
    fn platform(&self) -> &str {
        &self.platform
    }

    async fn get_count(&self, handle: &str, cancel: &CancelSignal) -> CountResult {
        match self.try_get_count(handle, cancel).await {
            Ok(count) => {
                debug!(platform = %self.platform, handle, count, "Count fetched");
                CountResult::ok(&self.platform, handle, count)
            }
            Err(FetchError::Cancelled) => {
                debug!(platform = %self.platform, handle, "Fetch cancelled");
                CountResult::unknown(&self.platform, handle)
            }
            Err(e) => {
                error!(
                    platform = %self.platform,
                    handle,
                    kind = ?e.failure_kind(),
                    error = %e,
                    "Failed to get count"
                );
                CountResult::failed(&self.platform, handle, e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for CounterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterClient")
            .field("platform", &self.platform)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
