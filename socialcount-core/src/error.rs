//! Core error types for `SocialCount`.

use std::fmt;
use thiserror::Error;

/// Core error type for `SocialCount` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Platform not found or not registered.
    #[error("Platform not found: {0}")]
    PlatformNotFound(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Count text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Why a count string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing left after stripping separators and suffixes.
    Empty,
    /// Leading minus sign.
    Negative,
    /// Not a plain decimal number.
    InvalidNumber,
    /// Value does not fit in the target integer width.
    Overflow,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty numeric portion",
            Self::Negative => "negative count",
            Self::InvalidNumber => "not a valid decimal",
            Self::Overflow => "value out of range",
        })
    }
}

/// A count string that does not conform to the suffix grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse count '{text}'{}: {kind}", handle_suffix(.handle))]
pub struct ParseError {
    /// The offending text, as received.
    pub text: String,
    /// Handle being processed when the error occurred.
    pub handle: Option<String>,
    /// Classification of the failure.
    pub kind: ParseErrorKind,
}

fn handle_suffix(handle: &Option<String>) -> String {
    handle
        .as_deref()
        .map(|h| format!(" for {h}"))
        .unwrap_or_default()
}

impl ParseError {
    /// Creates a parse error for the given text.
    pub fn new(text: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            text: text.into(),
            handle: None,
            kind,
        }
    }

    /// Attaches the handle being processed.
    #[must_use]
    pub fn for_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }
}
