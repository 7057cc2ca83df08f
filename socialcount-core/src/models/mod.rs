//! Domain models for SocialCount.
//!
//! ## Submodules
//!
//! - [`platform`] - Platform types (PlatformKind, PlatformMetadata)
//! - [`count`] - Per-source results (CountResult, CountStatus)
//! - [`report`] - Aggregated results (AggregateReport)

mod count;
mod platform;
mod report;

// Re-export everything at the models level
pub use count::{CountResult, CountStatus};
pub use platform::{PlatformKind, PlatformMetadata};
pub use report::AggregateReport;
