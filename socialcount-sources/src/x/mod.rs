//! X (formerly Twitter) source.
//!
//! X profile pages require a session, so the count is read from a public
//! profile mirror.

mod descriptor;
pub(crate) mod parser;

pub use descriptor::x_descriptor;
pub use parser::{XExtractor, x_route};
