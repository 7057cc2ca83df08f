//! YouTube source.
//!
//! Reads the subscriber count from the channel page at `/@{handle}`.

mod descriptor;
pub(crate) mod parser;

pub use descriptor::youtube_descriptor;
pub use parser::{YoutubeExtractor, youtube_route};
