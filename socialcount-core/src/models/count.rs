//! Count result types.
//!
//! A [`CountResult`] is produced once per source per query and never
//! mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Count Status
// ============================================================================

/// Outcome of one source's attempt to produce a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CountStatus {
    /// The count was fetched and parsed.
    Ok,
    /// Fetching or parsing failed; the count is zero and meaningless.
    #[default]
    Failed,
    /// The source was cancelled before it could decide.
    Unknown,
}

// ============================================================================
// Count Result
// ============================================================================

/// The count reported by a single source for a single handle.
///
/// `count` is always zero unless `status` is [`CountStatus::Ok`]. Use
/// [`CountResult::value`] to tell a legitimate zero apart from a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Identity of the source that produced this result.
    pub source: String,
    /// The handle that was queried.
    pub handle: String,
    /// The parsed count (zero on failure).
    pub count: u64,
    /// Whether the count is meaningful.
    pub success: bool,
    /// Detailed status.
    pub status: CountStatus,
    /// Failure description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the result was produced.
    pub fetched_at: DateTime<Utc>,
}

impl CountResult {
    /// Creates a successful result.
    pub fn ok(source: impl Into<String>, handle: impl Into<String>, count: u64) -> Self {
        Self {
            source: source.into(),
            handle: handle.into(),
            count,
            success: true,
            status: CountStatus::Ok,
            error: None,
            fetched_at: Utc::now(),
        }
    }

    /// Creates a failed result with a zero count.
    pub fn failed(
        source: impl Into<String>,
        handle: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            handle: handle.into(),
            count: 0,
            success: false,
            status: CountStatus::Failed,
            error: Some(error.into()),
            fetched_at: Utc::now(),
        }
    }

    /// Creates a result for a source that was cancelled mid-flight.
    pub fn unknown(source: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            handle: handle.into(),
            count: 0,
            success: false,
            status: CountStatus::Unknown,
            error: Some("cancelled".to_string()),
            fetched_at: Utc::now(),
        }
    }

    /// Returns the count if it is meaningful.
    pub fn value(&self) -> Option<u64> {
        match self.status {
            CountStatus::Ok => Some(self.count),
            CountStatus::Failed | CountStatus::Unknown => None,
        }
    }

    /// Returns true if the outcome was decided (successfully or not).
    pub fn is_settled(&self) -> bool {
        self.status != CountStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_result() {
        let r = CountResult::ok("Youtube", "someone", 1200);
        assert!(r.success);
        assert_eq!(r.value(), Some(1200));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_failed_result_is_zero() {
        let r = CountResult::failed("X", "someone", "HTTP 404");
        assert!(!r.success);
        assert_eq!(r.count, 0);
        assert_eq!(r.value(), None);
        assert!(r.is_settled());
    }

    #[test]
    fn test_legitimate_zero_is_distinguishable() {
        let zero = CountResult::ok("TikTok", "new_account", 0);
        let failed = CountResult::failed("TikTok", "new_account", "parse error");
        assert_eq!(zero.count, failed.count);
        assert_ne!(zero.value(), failed.value());
    }

    #[test]
    fn test_unknown_not_settled() {
        let r = CountResult::unknown("Facebook", "page");
        assert!(!r.is_settled());
        assert_eq!(r.status, CountStatus::Unknown);
    }

    #[test]
    fn test_serialization_skips_missing_error() {
        let r = CountResult::ok("Instagram", "someone", 5);
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"status\":\"ok\""));
    }
}
