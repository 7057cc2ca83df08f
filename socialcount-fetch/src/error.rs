//! Fetch error types.

use socialcount_core::ParseError;
use std::time::Duration;
use thiserror::Error;

use crate::retry::is_retryable_status;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The source answered with a non-success status.
    #[error("HTTP status {status}")]
    HttpStatus {
        /// Status code returned by the source.
        status: u16,
    },

    /// The overall time budget ran out before any attempt finished.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the operation.
    #[error("Cancelled")]
    Cancelled,

    /// The content did not have the expected shape.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The extracted count text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The handle cannot name a profile.
    #[error("Invalid handle '{0}'")]
    InvalidHandle(String),
}

/// Error classes as seen at the source client boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error, retryable status, or timeout.
    Transient,
    /// Non-retryable status or unusable configuration.
    Permanent,
    /// Content did not match the expected shape.
    Extraction,
    /// Count text did not conform to the suffix grammar.
    Parse,
    /// Cancelled by the caller.
    Cancelled,
}

impl FetchError {
    /// Classifies this error.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Transport(e) if e.is_retryable() => FailureKind::Transient,
            Self::HttpStatus { status } if is_retryable_status(*status) => FailureKind::Transient,
            Self::Timeout(_) => FailureKind::Transient,
            Self::Transport(_)
            | Self::HttpStatus { .. }
            | Self::Config(_)
            | Self::InvalidHandle(_) => FailureKind::Permanent,
            Self::Extraction(_) => FailureKind::Extraction,
            Self::Parse(_) => FailureKind::Parse,
            Self::Cancelled => FailureKind::Cancelled,
        }
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Failure below the HTTP layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not connect.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The attempt exceeded its own timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request failed in flight.
    #[error("Request error: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("Failed to read body: {0}")]
    Body(String),

    /// The request target could not be resolved to a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Returns true for network-level failures worth retrying.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidUrl(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidUrl(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
