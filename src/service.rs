//! Token issuance and verification
//!
//! [`TokenService`] owns the signing secret and a [`Clock`]. It is stateless past
//! construction, so one instance can be shared across threads behind an `Arc`.
//!
//! ```text
//! issue:   identity map ─► Claims::issue ─► encode_token ─► "h.p.s"
//! verify:  "h.p.s" ─► ParsedToken ─► VerifiedToken ─► Token
//!                      (format)      (alg + MAC)      (exp, nbf, iss, aud)
//! ```

use crate::claims::{Claims, IssueOptions, VerifyOptions};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::secret::Secret;
use crate::token::{ParsedToken, Token, encode_token};
use crate::utils::bounds::validate_clock_skew;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Issues and verifies tokens under one secret
#[derive(Clone)]
pub struct TokenService {
    secret: Secret,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a service reading wall-clock time
    pub fn new(secret: Secret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// Create a service reading time from `clock`
    pub fn with_clock(secret: Secret, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    /// Current time according to the service clock
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Issue a token for `identity`, stamped with the current time
    ///
    /// `identity` carries caller fields only (family id, role, ...). Any `iat`,
    /// `exp`, `nbf`, `iss` or `aud` it contains is replaced.
    pub fn issue(&self, identity: Map<String, Value>, options: &IssueOptions) -> Result<String> {
        self.issue_at(identity, options, self.clock.now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        identity: Map<String, Value>,
        options: &IssueOptions,
        now: i64,
    ) -> Result<String> {
        let claims = Claims::issue(identity, now, options).inspect_err(|e| {
            tracing::warn!(reason = e.reason(), error = %e, "token issue rejected");
        })?;

        let token = encode_token(&claims, &self.secret)?;

        tracing::debug!(
            lifetime_seconds = options.lifetime_seconds(),
            has_issuer = claims.issuer.is_some(),
            has_audience = claims.audience.is_some(),
            "issued token"
        );

        Ok(token)
    }

    /// Verify a token against the current time
    ///
    /// # Errors
    ///
    /// Checks run in this order and stop at the first failure:
    /// - `Error::MissingToken` - empty input
    /// - `Error::TokenTooLarge` / `Error::MalformedToken` - not three non-empty parts
    /// - `Error::DecodingFailed` - bad Base64URL or JSON in header or payload
    /// - `Error::UnsupportedAlgorithm` - header `alg` is not HS256
    /// - `Error::BadSignature` - MAC mismatch
    /// - `Error::Expired` / `Error::NotYetValid` - outside the validity window
    /// - `Error::BadIssuer` / `Error::BadAudience` - only when requested in `options`
    pub fn verify(&self, token: &str, options: &VerifyOptions) -> Result<Token> {
        self.verify_at(token, options, self.clock.now())
    }

    /// Verify a token as if the current time were `now`
    pub fn verify_at(&self, token: &str, options: &VerifyOptions, now: i64) -> Result<Token> {
        let result = validate_clock_skew(options.clock_skew_seconds())
            .and_then(|()| ParsedToken::from_string(token))
            .and_then(|parsed| parsed.verify_signature(&self.secret))
            .and_then(|verified| verified.validate(options, now));

        if let Err(e) = &result {
            if e.is_client_error() {
                tracing::debug!(reason = e.reason(), "token verification failed");
            } else {
                tracing::warn!(reason = e.reason(), error = %e, "token verification misconfigured");
            }
        }

        result
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

/// Issue a token with a one-off secret
///
/// Fails with `Error::Configuration` when `secret` is empty.
pub fn issue(
    identity: Map<String, Value>,
    secret: impl AsRef<[u8]>,
    options: &IssueOptions,
) -> Result<String> {
    TokenService::new(checked_secret(secret)?).issue(identity, options)
}

/// Verify a token with a one-off secret
///
/// Fails with `Error::Configuration` when `secret` is empty.
pub fn verify(token: &str, secret: impl AsRef<[u8]>, options: &VerifyOptions) -> Result<Token> {
    TokenService::new(checked_secret(secret)?).verify(token, options)
}

fn checked_secret(secret: impl AsRef<[u8]>) -> Result<Secret> {
    Secret::new(secret.as_ref()).inspect_err(|e| {
        tracing::warn!(reason = e.reason(), "refusing to use an empty signing secret");
    })
}
