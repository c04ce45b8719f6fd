//! The token MAC scheme
//!
//! Tokens are signed with exactly one algorithm, HMAC-SHA256. The header still
//! names it so that a token declaring anything else (including `"none"`) is
//! rejected before the MAC is ever computed.

pub mod hmac;

use crate::error::{Error, Result};

/// Algorithm identifier from the token header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,
}

impl Algorithm {
    /// Parse algorithm string from the token header
    ///
    /// Matching is exact: `"hs256"` or `"None"` are unsupported, not aliases.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(Algorithm::HS256),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
        }
    }

    /// Compute the MAC over `signing_input`
    pub fn sign(&self, signing_input: &str, secret: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::HS256 => hmac::sign_hs256(signing_input, secret),
        }
    }

    /// Verify a Base64URL-encoded MAC over `signing_input`
    pub fn verify(&self, signing_input: &str, signature: &str, secret: &[u8]) -> Result<()> {
        match self {
            Algorithm::HS256 => hmac::verify_hs256(signing_input, signature, secret),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
