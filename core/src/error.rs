//! Error types for the catalog API client.
//!
//! # Design
//! `Marvel` gets a dedicated variant because the gateway reports failures with
//! its own error category (`InvalidCredentials`, `MissingParameter`, ...) that
//! callers match on. Non-2xx responses whose body is not a recognisable error
//! payload land in `HttpError` with the raw status code and body.

use thiserror::Error;

/// A failure reported by the remote gateway itself.
///
/// `code` is the gateway's error category. Some error bodies carry a numeric
/// code instead, which is kept as its decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} (HTTP {status}): {message}")]
pub struct MarvelApiError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl MarvelApiError {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by query construction, request building and response parsing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The query was rejected before any request was built.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The gateway answered with an error payload.
    #[error("marvel api error: {0}")]
    Marvel(#[from] MarvelApiError),

    /// The server returned a non-2xx status with an unrecognised body.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),

    /// Client configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The gateway error, if this is one.
    pub fn as_marvel(&self) -> Option<&MarvelApiError> {
        match self {
            ApiError::Marvel(err) => Some(err),
            _ => None,
        }
    }
}
