//! The authenticated token
//!
//! `Token` is the only token state handed to callers by [`crate::TokenService`].
//! It exists only after the signature and every enabled claim check passed.

use crate::claims::{Audience, Claims};
use crate::token::TokenHeader;
use serde_json::{Map, Value};

/// A fully verified token
///
/// By the time you hold a `Token`:
///
/// - **Parsing**: header and payload were decoded from Base64URL segments
/// - **Algorithm**: the header declared HS256
/// - **Signature**: the MAC matched under the service secret
/// - **Claims**: `exp`, `nbf` and any requested `iss`/`aud` were accepted
///
/// # Examples
///
/// ```ignore
/// let token = service.verify(&raw, &VerifyOptions::default())?;
/// println!("family: {:?}", token.get_str("family_id"));
/// println!("expires: {}", token.expiration());
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    header: TokenHeader,
    claims: Claims,
}

impl Token {
    pub(crate) fn new(header: TokenHeader, claims: Claims) -> Self {
        Self { header, claims }
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get all claims
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Get the issued-at time (iat)
    pub fn issued_at(&self) -> i64 {
        self.claims.issued_at
    }

    /// Get the expiration time (exp)
    pub fn expiration(&self) -> i64 {
        self.claims.expiration
    }

    /// Get the not-before time (nbf)
    pub fn not_before(&self) -> Option<i64> {
        self.claims.not_before
    }

    /// Get the issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.claims.issuer.as_deref()
    }

    /// Get the audience (aud)
    pub fn audience(&self) -> Option<&Audience> {
        self.claims.audience.as_ref()
    }

    /// Get a caller-supplied claim
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Get a caller-supplied claim as a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.claims.get_str(key)
    }

    /// Caller-supplied claims, without the reserved fields
    pub fn extra(&self) -> &Map<String, Value> {
        &self.claims.extra
    }

    /// Consume the token and return its claims
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}
