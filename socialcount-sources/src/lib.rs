// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SocialCount` Sources
//!
//! Platform-specific sources for the `SocialCount` workspace.
//!
//! Each platform module includes:
//!
//! - **Descriptor**: Static configuration (metadata, origin, CLI names)
//! - **Parser**: The request target and the extractor that locates the
//!   count in the fetched page
//!
//! ## Supported Platforms
//!
//! | Platform | Origin | Target | Rounding |
//! |----------|--------|--------|----------|
//! | YouTube | youtube.com | `/@{handle}` | Truncate |
//! | Instagram | instagram.com | `/{handle}/` | Truncate |
//! | X | twstalker.com | `/{handle}` | Truncate |
//! | TikTok | tiktok.com | `/@{handle}` | Truncate |
//! | Facebook | facebook.com | `/{handle}/followers` | Truncate |
//! | LinkedIn | google.com | `/search?q="…/in/{handle}"` | Ceiling |
//!
//! ## Usage
//!
//! ```ignore
//! use socialcount_sources::PlatformRegistry;
//! use socialcount_fetch::CancelSignal;
//! use std::collections::HashMap;
//!
//! let aggregator = PlatformRegistry::build_aggregator(
//!     &PlatformRegistry::kinds(),
//!     &HashMap::new(),
//! )?;
//! let report = aggregator.query("someone", &CancelSignal::new()).await;
//! ```

pub mod descriptor;
pub mod registry;

// Platform modules
pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod tiktok;
pub mod x;
pub mod youtube;

#[cfg(test)]
mod parser_edge_tests;

// Re-export key types
pub use descriptor::{CliConfig, DEFAULT_HTML_HEADERS, PlatformDescriptor, SourcePlan};
pub use registry::PlatformRegistry;

// Re-export platform descriptors
pub use facebook::facebook_descriptor;
pub use instagram::instagram_descriptor;
pub use linkedin::linkedin_descriptor;
pub use tiktok::tiktok_descriptor;
pub use x::x_descriptor;
pub use youtube::youtube_descriptor;
