//! Aggregate report type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::count::CountResult;

/// Results for one handle across all registered sources.
///
/// Holds at most one entry per source. Element order follows completion
/// order and carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// The handle that was queried.
    pub handle: String,
    /// Per-source results, failed ones included.
    pub results: Vec<CountResult>,
    /// Whether the query was cancelled before every source finished.
    pub cancelled: bool,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
}

impl AggregateReport {
    /// Creates a report from collected results.
    pub fn new(handle: impl Into<String>, results: Vec<CountResult>, cancelled: bool) -> Self {
        Self {
            handle: handle.into(),
            results,
            cancelled,
            generated_at: Utc::now(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no source produced an entry.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Entries that produced a count.
    pub fn successes(&self) -> impl Iterator<Item = &CountResult> {
        self.results.iter().filter(|r| r.success)
    }

    /// Entries that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CountResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Sum of all successful counts.
    pub fn total(&self) -> u64 {
        self.successes().fold(0u64, |acc, r| acc.saturating_add(r.count))
    }

    /// Looks up the entry for a source, case-insensitively.
    pub fn get(&self, source: &str) -> Option<&CountResult> {
        self.results
            .iter()
            .find(|r| r.source.eq_ignore_ascii_case(source))
    }

    /// Returns the results sorted by source name.
    pub fn sorted(&self) -> Vec<&CountResult> {
        let mut sorted: Vec<_> = self.results.iter().collect();
        sorted.sort_by(|a, b| a.source.cmp(&b.source));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AggregateReport {
        AggregateReport::new(
            "someone",
            vec![
                CountResult::ok("Youtube", "someone", 1_500),
                CountResult::failed("X", "someone", "HTTP 403"),
                CountResult::ok("Instagram", "someone", 2_500),
            ],
            false,
        )
    }

    #[test]
    fn test_totals() {
        let report = sample();
        assert_eq!(report.len(), 3);
        assert_eq!(report.successes().count(), 2);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.total(), 4_000);
    }

    #[test]
    fn test_get_case_insensitive() {
        let report = sample();
        assert_eq!(report.get("youtube").map(|r| r.count), Some(1_500));
        assert!(report.get("tiktok").is_none());
    }

    #[test]
    fn test_sorted() {
        let report = sample();
        let names: Vec<_> = report.sorted().iter().map(|r| r.source.as_str()).collect();
        assert_eq!(names, vec!["Instagram", "X", "Youtube"]);
    }
}
