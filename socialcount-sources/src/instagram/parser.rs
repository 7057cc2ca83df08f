//! Instagram profile page parser.

use regex::Regex;
use socialcount_fetch::{Extractor, FetchError, path_segment};
use std::sync::LazyLock;

static META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:description" content="([\d,.KMB]+) Followers,"#)
        .expect("Invalid regex")
});

/// Request target for a profile handle.
pub fn instagram_route(handle: &str) -> String {
    format!("/{}/", path_segment(handle))
}

/// Reads `<n> Followers,` from the `og:description` meta tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstagramExtractor;

impl Extractor for InstagramExtractor {
    fn locate(&self, content: &str) -> Result<String, FetchError> {
        META_RE
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .ok_or_else(|| FetchError::Extraction("follower count meta tag not found".to_string()))
    }
}
