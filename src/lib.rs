//! # famtoken - Family Access Tokens
//!
//! > Signed, time-bound bearer tokens and salted access-code hashing for a
//! > household meal-planning backend.
//!
//! A family logs in with a shared numeric code. The code is checked against a
//! stored salt and SHA-256 digest, and on success the family receives a token
//! that authorizes every later request until it expires. There is no session
//! store: the token itself is the proof, so it must be unforgeable and its
//! expiry must be enforced on every request.
//!
//! ## Quick Start
//!
//! ```ignore
//! use famtoken::*;
//!
//! let config = AuthConfig::from_env()?;
//! let service = config.token_service();
//!
//! // Login: check the code, then issue a token for the family
//! if let Some(record) = find_matching_record(&code, &candidates) {
//!     let principal = FamilyPrincipal::new(record.id.to_string(), Role::Member);
//!     let token = service.issue(principal.identity_claims(), &config.issue_options())?;
//! }
//!
//! // Every request afterwards
//! let principal = authenticate(authorization, &service, &config.verify_options())?;
//! ```
//!
//! ## Token Format
//!
//! A token is three unpadded Base64URL segments joined by `.`:
//!
//! ```text
//! base64url({"alg":"HS256","type":"token"})
//!   . base64url({"iat":..,"exp":..,"family_id":..,"role":..})
//!   . base64url(HMAC-SHA256(secret, header "." payload))
//! ```
//!
//! ## Verification Flow
//!
//! Verification moves a token through type-level states. Each check
//! short-circuits with its own [`Error`] variant:
//!
//! ```text
//! &str
//!     │ ParsedToken::from_string()   MissingToken, MalformedToken, DecodingFailed
//!     ▼
//! ParsedToken (header and payload decoded, untrusted)
//!     │ .verify_signature()          UnsupportedAlgorithm, BadSignature
//!     ▼
//! VerifiedToken (MAC checked)
//!     │ .validate()                  DecodingFailed, Expired, NotYetValid,
//!     ▼                              BadIssuer, BadAudience
//! Token (safe to use)
//! ```
//!
//! Nothing in the payload is type-decoded or compared until the MAC has been
//! checked, and the MAC comparison is constant-time.
//!
//! ## Errors
//!
//! Each failure keeps its own variant for logs and tests. Show clients only
//! [`Error::public_message`], which is the same for every rejected token.
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; installing a subscriber is up to the
//! application. Tokens, secrets and access codes are never logged.

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Time and keys
pub mod clock;
pub mod secret;

// Algorithm
pub mod algorithm;

// Claims and validation
pub mod claims;

// Token types
pub mod token;

// Issue / verify (main public API)
pub mod service;

// Caller boundary
pub mod bearer;
pub mod config;
pub mod principal;

// Access codes
pub mod credential;

// ============================================================================
// PUBLIC API
// ============================================================================

// Main token flow
pub use service::{TokenService, issue, verify};
pub use token::Token;

// Configuration
pub use claims::{IssueOptions, VerifyOptions};
pub use config::AuthConfig;
pub use secret::Secret;

// Request authentication
pub use bearer::extract_bearer_token;
pub use principal::{FamilyPrincipal, Role, authenticate};

// Access codes
pub use credential::{
    CredentialRecord, Salt, derive_hash, find_matching_record, generate_access_code,
    generate_salt, lookup_suffix, verify_code,
};

// Supporting types for advanced usage
pub use algorithm::Algorithm;
pub use claims::{Audience, Claims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use token::{ParsedToken, TokenHeader, VerifiedToken};
