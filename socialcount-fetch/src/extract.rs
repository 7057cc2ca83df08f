//! Count extraction from raw content.

use socialcount_core::{RoundingPolicy, parse_count};

use crate::error::FetchError;

/// Locates and parses a count in fetched content.
///
/// Implementations only find the numeric text; parsing is shared so every
/// source honors the same suffix grammar.
pub trait Extractor: Send + Sync {
    /// Returns the raw count text, e.g. `"1.2M"`.
    ///
    /// Fails with [`FetchError::Extraction`] if the content does not have
    /// the expected shape.
    fn locate(&self, content: &str) -> Result<String, FetchError>;

    /// How fractional counts are rounded.
    fn rounding(&self) -> RoundingPolicy {
        RoundingPolicy::Truncate
    }

    /// Locates and parses the count for `handle`.
    fn extract(&self, content: &str, handle: &str) -> Result<u64, FetchError> {
        let text = self.locate(content)?;
        parse_count(&text, self.rounding()).map_err(|e| FetchError::Parse(e.for_handle(handle)))
    }
}
