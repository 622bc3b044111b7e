//! Error taxonomy for the lookup pipeline.
//!
//! Every kind collapses into one generic message at the orchestrator
//! boundary; the detail is only ever logged.

use reqwest::StatusCode;
use thiserror::Error;

/// Text shown for any failed lookup, whatever went wrong underneath.
pub const FAILURE_MESSAGE: &str = "City not found or service unavailable. Try another name.";

/// Text shown when the city field is empty.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name.";

/// A single HTTP round trip failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, TLS, ...).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: StatusCode },

    /// The body could not be decoded as the expected JSON.
    #[error("malformed response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl TransportError {
    /// Status code carried by a `Status` failure.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Anything that can stop a city lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Empty (or whitespace-only) city text; never reaches the network.
    #[error("city name is empty")]
    Validation,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Well-formed geocoding response without any match.
    #[error("no geocoding match for {query:?}")]
    NotFound { query: String },
}

impl LookupError {
    /// Get the user-facing message for this error.
    ///
    /// Transport and not-found failures share one message on purpose, the
    /// user gets no hint about which stage broke.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation => EMPTY_INPUT_MESSAGE,
            Self::Transport(_) | Self::NotFound { .. } => FAILURE_MESSAGE,
        }
    }
}
