//! Facebook source.
//!
//! Reads the follower count from the page's followers tab.

mod descriptor;
pub(crate) mod parser;

pub use descriptor::facebook_descriptor;
pub use parser::{FacebookExtractor, facebook_route};
