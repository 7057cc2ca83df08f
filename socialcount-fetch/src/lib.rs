// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SocialCount` Fetch
//!
//! Resilient fetching and concurrent aggregation for `SocialCount`.
//!
//! ## Building Blocks
//!
//! - [`transport::Fetcher`] - Raw content for a request target
//! - [`host::http::HttpClient`] - reqwest-backed fetcher bound to one origin
//! - [`retry::ResilientFetcher`] - Bounded retries with backoff, jitter and
//!   an overall time budget
//! - [`cancel::CancelSignal`] - Cooperative cancellation shared by every task
//! - [`extract::Extractor`] - Locates count text in fetched content
//!
//! ## Sources and Aggregation
//!
//! - [`source::SourceClient`] - One platform's `get_count`, which never fails
//!   outward
//! - [`client::CounterClient`] - Fetcher + retry policy + extractor
//! - [`aggregator::Aggregator`] - Fans a query out to every source
//!
//! ## Example
//!
//! ```ignore
//! use socialcount_fetch::{Aggregator, CancelSignal};
//!
//! let aggregator = Aggregator::new(clients);
//! let cancel = CancelSignal::new();
//! cancel.cancel_after(Duration::from_secs(20));
//!
//! let report = aggregator.query("someone", &cancel).await;
//! for result in report.successes() {
//!     println!("{}: {}", result.source, result.count);
//! }
//! ```

pub mod aggregator;
pub mod cancel;
pub mod client;
pub mod error;
pub mod extract;
pub mod host;
pub mod retry;
pub mod settings;
pub mod source;
pub mod transport;

// Errors
pub use error::{FailureKind, FetchError, TransportError};

// Transport
pub use host::http::HttpClient;
pub use transport::{Fetcher, RawResponse};

// Retry & cancellation
pub use cancel::CancelSignal;
pub use retry::{
    Classification, Classifier, ResilientFetcher, RetryOutcome, RetryPolicy, Terminal,
    default_classifier, is_retryable_status,
};
pub use settings::SourceSettings;

// Sources & aggregation
pub use aggregator::Aggregator;
pub use client::{CounterClient, RouteFn, normalize_handle, path_segment};
pub use extract::Extractor;
pub use source::SourceClient;
