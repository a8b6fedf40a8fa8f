//! Error types for web monetization wallet resolution and verification
//!
//! This module provides the crate-wide error hierarchy. Each concern
//! (validation, verification, storage) has its own error enum, all of which
//! convert into the top-level [`WebMonetizationError`].

use thiserror::Error;

/// Result type used throughout the crate
pub type WebMonetizationResult<T> = Result<T, WebMonetizationError>;

/// Top-level error type for all web monetization operations
#[derive(Debug, Error)]
pub enum WebMonetizationError {
    /// A wallet address failed syntactic validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Interactive wallet verification failed
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// A configuration store operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Reasons a wallet address string is rejected by the validator
///
/// Every variant corresponds to one rejection rule so that callers can give
/// precise inline feedback ("Invalid Wallet Address format" plus detail).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input was not a single pointer token (embedded whitespace)
    #[error("wallet address must not contain whitespace")]
    EmbeddedWhitespace,

    /// Input contains a character outside the URL-safe set
    #[error("wallet address contains forbidden character '{0}'")]
    ForbiddenCharacter(char),

    /// Input exceeds the maximum accepted length
    #[error("wallet address exceeds {max} characters")]
    TooLong { max: usize },

    /// Input could not be parsed as a URL at all
    #[error("wallet address is not a valid URL")]
    NotAUrl,

    /// URL scheme is not https
    #[error("wallet address must use the https scheme, got '{0}'")]
    InvalidScheme(String),

    /// Host component is empty or not a valid DNS hostname
    #[error("wallet address host '{0}' is not a valid hostname")]
    InvalidHost(String),

    /// A non-default port was given
    #[error("wallet address must not specify a port")]
    PortNotAllowed,

    /// A query string was given
    #[error("wallet address must not contain a query string")]
    QueryNotAllowed,

    /// A fragment was given
    #[error("wallet address must not contain a fragment")]
    FragmentNotAllowed,

    /// The path is empty or just "/": a payment pointer must designate a
    /// concrete resource, not a bare domain
    #[error("wallet address must include a path")]
    MissingPath,

    /// A field that accepts a single pointer was given several
    #[error("this field accepts a single wallet address")]
    MultiplePointersNotAllowed,
}

/// Errors from the interactive wallet verification flow
#[derive(Debug, Error)]
pub enum VerificationError {
    /// A verification for this input field is already in flight
    #[error("verification already in progress for field '{field}'")]
    AlreadyInFlight { field: String },

    /// The operation was cancelled before completion
    #[error("wallet verification was cancelled")]
    Cancelled,

    /// The wallet details request timed out
    #[error("wallet details request timed out")]
    Timeout,

    /// The wallet details request failed (network or HTTP status)
    #[error("wallet details request failed: {0}")]
    RequestFailed(String),

    /// The wallet details document was malformed or incomplete
    #[error("invalid wallet details document: {0}")]
    InvalidDetails(String),

    /// A pointer failed syntactic validation before any fetch
    #[error("invalid wallet address '{pointer}': {source}")]
    InvalidPointer {
        pointer: String,
        source: ValidationError,
    },
}

impl VerificationError {
    /// Create an in-flight error for a field
    pub fn already_in_flight(field: &str) -> Self {
        VerificationError::AlreadyInFlight {
            field: field.to_string(),
        }
    }

    /// Create a request failure error
    pub fn request_failed(msg: impl Into<String>) -> Self {
        VerificationError::RequestFailed(msg.into())
    }

    /// Create an invalid details error
    pub fn invalid_details(msg: impl Into<String>) -> Self {
        VerificationError::InvalidDetails(msg.into())
    }

    /// Whether the caller may retry the verification as-is
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VerificationError::Timeout
                | VerificationError::RequestFailed(_)
                | VerificationError::AlreadyInFlight { .. }
        )
    }
}
