//! Error types for Moneta
//!
//! The wire-facing failure categories are distinct so callers can branch:
//! `Network` (no response received), `Http` (4xx/5xx with a body), and
//! `Validation` (response received but malformed for its endpoint).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: the request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a 4xx/5xx status. The raw body is preserved
    /// so auth-flow callers can extract per-field error details.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        body: serde_json::Value,
    },

    /// A 2xx response body that does not match the endpoint's schema.
    /// No partially-populated entity ever escapes this variant.
    #[error("Invalid response from {endpoint}: {source}")]
    Validation {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
