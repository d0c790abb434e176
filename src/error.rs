//! Error types
//!
//! Extraction itself never fails; these cover the edges around it
//! (selector compilation, request decoding, payload encoding).

use thiserror::Error;

/// Failure to compile a selector query
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid :eq() index in '{0}'")]
    InvalidIndex(String),
}

/// Failure to decode an extraction request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to parse request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to encode the persistence payload
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
