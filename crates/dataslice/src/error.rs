//! Error types for the dataslice library.

use thiserror::Error;

/// Main error type for domain construction.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The domain type tag is neither a known name nor a `DomainType` member.
    #[error(
        "Cannot instantiate Domain (domain_type \"{value}\" of type \"{kind}\" is not supported)"
    )]
    InvalidDomainType {
        /// The offending value, rendered as text.
        value: String,
        /// Runtime type of the offending value (e.g. "string", "integer").
        kind: &'static str,
    },

    /// A mapping was expected but something else was supplied.
    #[error("Malformed domain kwargs: {0}")]
    MalformedKwargs(String),

    /// Unknown semantic domain type name or value.
    #[error("Invalid semantic domain type: {0}")]
    InvalidSemanticType(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dataslice operations.
pub type Result<T> = std::result::Result<T, DomainError>;
