//! Host APIs for SocialCount source clients.
//!
//! - [`http`] - HTTP transport bound to a source origin

pub mod http;

pub use http::{DEFAULT_REQUEST_TIMEOUT, HttpClient, ResponseExt};
