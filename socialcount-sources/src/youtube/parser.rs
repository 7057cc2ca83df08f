//! YouTube channel page parser.

use socialcount_fetch::{Extractor, FetchError, path_segment};

const COUNT_END: &str = "subscribers\"}";
const COUNT_START: &str = "content\":\"";

/// Request target for a channel handle.
pub fn youtube_route(handle: &str) -> String {
    format!("/@{}", path_segment(handle))
}

/// Takes the last `content":"` value before the first `subscribers"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YoutubeExtractor;

impl Extractor for YoutubeExtractor {
    fn locate(&self, content: &str) -> Result<String, FetchError> {
        let end = content.find(COUNT_END).ok_or_else(|| {
            FetchError::Extraction("subscriber count marker not found".to_string())
        })?;
        let before = &content[..end];
        let start = before.rfind(COUNT_START).ok_or_else(|| {
            FetchError::Extraction("subscriber count value not found".to_string())
        })?;

        Ok(before[start + COUNT_START.len()..].trim().to_string())
    }
}
