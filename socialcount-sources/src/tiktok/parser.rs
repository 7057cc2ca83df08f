//! TikTok profile page parser.

use socialcount_fetch::{Extractor, FetchError, path_segment};

const STATS_MARKER: &str = r#""stats":{"followerCount":"#;

/// Request target for a profile handle.
pub fn tiktok_route(handle: &str) -> String {
    format!("/@{}", path_segment(handle))
}

/// Reads the integer after `"stats":{"followerCount":`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TikTokExtractor;

impl Extractor for TikTokExtractor {
    fn locate(&self, content: &str) -> Result<String, FetchError> {
        let start = content
            .find(STATS_MARKER)
            .map(|i| i + STATS_MARKER.len())
            .ok_or_else(|| FetchError::Extraction("stats section not found".to_string()))?;
        let rest = &content[start..];
        let end = rest
            .find([',', '}'])
            .ok_or_else(|| FetchError::Extraction("followerCount value not terminated".to_string()))?;

        Ok(rest[..end].trim().to_string())
    }
}
