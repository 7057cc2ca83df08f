//! LinkedIn source.
//!
//! LinkedIn profiles are not public, so the count comes from a web search
//! snippet for the profile URL. Snippets round down and mark the value with
//! `+`, so the count is rounded up.

mod descriptor;
pub(crate) mod parser;

pub use descriptor::linkedin_descriptor;
pub use parser::{LinkedInExtractor, linkedin_route};
