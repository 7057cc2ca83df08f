//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, PlatformInfoOutput};
pub use text::TextFormatter;
