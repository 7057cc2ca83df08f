// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SocialCount` Core
//!
//! Core types, models, and count parsing for the `SocialCount` workspace.
//!
//! This crate provides the foundational pieces used across all other
//! `SocialCount` crates:
//!
//! - Domain models (platforms, per-source results, aggregate reports)
//! - The numeric suffix grammar shared by every extractor
//! - Error types
//!
//! ## Key Types
//!
//! ### Platform Types
//! - [`PlatformKind`] - Enum of all supported platforms
//! - [`PlatformMetadata`] - Display info and request defaults
//!
//! ### Results
//! - [`CountResult`] - One source's count for one handle
//! - [`CountStatus`] - Ok / Failed / Unknown
//! - [`AggregateReport`] - All results for one query
//!
//! ### Parsing
//! - [`number::parse_count`] - `"2.5K"` → `2500`
//! - [`RoundingPolicy`] - Truncate or round up fractional counts

pub mod error;
pub mod models;
pub mod number;

// Re-export error types
pub use error::{CoreError, ParseError, ParseErrorKind};

// Re-export all model types
pub use models::{AggregateReport, CountResult, CountStatus, PlatformKind, PlatformMetadata};

// Re-export parsing entry points
pub use number::{RoundingPolicy, parse_count};
