//! LinkedIn search snippet parser.

use regex::Regex;
use socialcount_core::RoundingPolicy;
use socialcount_fetch::{Extractor, FetchError};
use std::sync::LazyLock;
use url::form_urlencoded;

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?K?\+?)\s*followers?").expect("Invalid regex")
});

/// Request target: a search for the quoted profile URL.
pub fn linkedin_route(handle: &str) -> String {
    let query = format!("\"https://www.linkedin.com/in/{handle}\"");
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("/search?q={encoded}")
}

/// Reads `<n>[K][+] followers` and rounds fractional thousands up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedInExtractor;

impl Extractor for LinkedInExtractor {
    fn locate(&self, content: &str) -> Result<String, FetchError> {
        FOLLOWERS_RE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .ok_or_else(|| FetchError::Extraction("follower snippet not found".to_string()))
    }

    fn rounding(&self) -> RoundingPolicy {
        RoundingPolicy::Ceiling
    }
}
