//! Error types for token issuance, verification and credential hashing
//!
//! Every failure is a plain return value. Verification failures keep a distinct
//! variant per check so they can be logged and tested, while
//! [`Error::public_message`] collapses them into a single generic answer for
//! whatever is shown to a client.

use thiserror::Error;

/// famtoken errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token is missing")]
    MissingToken,

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Malformed token: expected three non-empty parts separated by '.'")]
    MalformedToken,

    #[error("Token decoding failed: {0}")]
    DecodingFailed(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    UnsupportedAlgorithm(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    BadSignature,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Token expired at {expired_at} (now: {now}, skew: {skew}s)")]
    Expired {
        expired_at: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token not valid until {not_before} (now: {now}, skew: {skew}s)")]
    NotYetValid {
        not_before: i64,
        now: i64,
        skew: u64,
    },

    #[error("Token issuer mismatch: expected '{expected}', found {found:?}")]
    BadIssuer {
        expected: String,
        found: Option<String>,
    },

    #[error("Token audience mismatch: expected '{expected}', found {found:?}")]
    BadAudience {
        expected: String,
        found: Vec<String>,
    },
}

impl Error {
    /// Stable snake_case code for this failure, suitable for logs and metrics labels
    pub fn reason(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration_error",
            Error::EntropyUnavailable(_) => "entropy_unavailable",
            Error::MissingToken => "missing_token",
            Error::TokenTooLarge { .. } | Error::MalformedToken => "malformed_token",
            Error::DecodingFailed(_) => "decoding_error",
            Error::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            Error::BadSignature => "bad_signature",
            Error::Expired { .. } => "expired",
            Error::NotYetValid { .. } => "not_yet_valid",
            Error::BadIssuer { .. } => "bad_issuer",
            Error::BadAudience { .. } => "bad_audience",
        }
    }

    /// Whether the failure was caused by client input rather than server state
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::Configuration(_) | Error::EntropyUnavailable(_))
    }

    /// Message that may be shown to a client
    ///
    /// All client-input failures share one message so a caller probing with forged
    /// tokens cannot learn which check rejected them.
    pub fn public_message(&self) -> &'static str {
        if self.is_client_error() {
            "unauthorized"
        } else {
            "internal error"
        }
    }
}

/// Result type alias for famtoken operations
pub type Result<T> = std::result::Result<T, Error>;
