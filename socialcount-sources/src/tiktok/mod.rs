//! TikTok source.
//!
//! Reads `followerCount` from the stats object embedded in the profile page.

mod descriptor;
pub(crate) mod parser;

pub use descriptor::tiktok_descriptor;
pub use parser::{TikTokExtractor, tiktok_route};
