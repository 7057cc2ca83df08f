//! Per-source client settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::host::DEFAULT_REQUEST_TIMEOUT;
use crate::retry::RetryPolicy;

/// Settings a source client is built from.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Origin every request target is resolved against.
    pub base_url: String,
    /// Timeout for a single attempt.
    pub request_timeout: Duration,
    /// Extra headers sent with every request.
    pub headers: HashMap<String, String>,
    /// Retry policy for each fetch.
    pub retry: RetryPolicy,
}

impl SourceSettings {
    /// Creates settings for the given origin with default timeouts and retries.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            headers: HashMap::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the per-attempt timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merges the given headers, overriding existing ones.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SourceSettings::new("https://example.com");
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.retry.overall_timeout, Duration::from_secs(10));
        assert!(settings.headers.is_empty());
    }

    #[test]
    fn test_header_override() {
        let settings = SourceSettings::new("https://example.com")
            .with_header("Accept-Language", "en")
            .with_headers(HashMap::from([(
                "Accept-Language".to_string(),
                "de".to_string(),
            )]));
        assert_eq!(settings.headers["Accept-Language"], "de");
    }
}
