//! Instagram source.
//!
//! Reads the follower count from the `og:description` meta tag of the
//! profile page.

mod descriptor;
pub(crate) mod parser;

pub use descriptor::instagram_descriptor;
pub use parser::{InstagramExtractor, instagram_route};
