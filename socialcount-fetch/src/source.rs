//! The per-platform source client capability.

use async_trait::async_trait;
use socialcount_core::CountResult;

use crate::cancel::CancelSignal;

/// One platform's way of getting a count for a handle.
///
/// `get_count` never fails outward: every failure is captured into the
/// returned [`CountResult`], and a fetch cancelled before it could decide
/// yields [`CountResult::unknown`].
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Stable platform name used to label results and logs.
    fn platform(&self) -> &str;

    /// Fetches the count for `handle`.
    async fn get_count(&self, handle: &str, cancel: &CancelSignal) -> CountResult;
}
