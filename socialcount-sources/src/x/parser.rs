//! X profile mirror parser.

use regex::Regex;
use socialcount_fetch::{Extractor, FetchError, path_segment};
use std::sync::LazyLock;

static PROFILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\w+ Twitter profile\. ([\d,.KMB]+) Followers").expect("Invalid regex")
});

/// Request target for a profile handle.
pub fn x_route(handle: &str) -> String {
    format!("/{}", path_segment(handle))
}

/// Reads `@name Twitter profile. <n> Followers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XExtractor;

impl Extractor for XExtractor {
    fn locate(&self, content: &str) -> Result<String, FetchError> {
        PROFILE_RE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .ok_or_else(|| FetchError::Extraction("profile summary not found".to_string()))
    }
}
