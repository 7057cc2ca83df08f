//! Facebook followers tab parser.

use regex::Regex;
use socialcount_fetch::{Extractor, FetchError, path_segment};
use std::sync::LazyLock;

static FOLLOWERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""text":"([\d,.KMB]+) followers""#).expect("Invalid regex")
});

/// Request target for a page handle.
pub fn facebook_route(handle: &str) -> String {
    format!("/{}/followers", path_segment(handle))
}

/// Reads `"text":"<n> followers"` from the embedded page data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacebookExtractor;

impl Extractor for FacebookExtractor {
    fn locate(&self, content: &str) -> Result<String, FetchError> {
        FOLLOWERS_RE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .ok_or_else(|| FetchError::Extraction("follower count text not found".to_string()))
    }
}
