mod validator;

pub use validator::{VerifyOptions, validate_claims};

use crate::error::{Error, Result};
use crate::limits::DEFAULT_LIFETIME_SECONDS;
use crate::utils::bounds::validate_lifetime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names owned by the token service
///
/// Caller-supplied values under these keys are never trusted; see [`Claims::issue`].
pub const RESERVED_CLAIMS: [&str; 5] = ["iat", "exp", "nbf", "iss", "aud"];

/// Audience (aud): a single recipient or a set of recipients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    /// Whether `audience` is, or is one of, the recipients
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }

    /// All recipients as a list
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Audience::Single(aud) => vec![aud.clone()],
            Audience::Many(auds) => auds.clone(),
        }
    }
}

impl From<&str> for Audience {
    fn from(audience: &str) -> Self {
        Audience::Single(audience.to_string())
    }
}

impl From<String> for Audience {
    fn from(audience: String) -> Self {
        Audience::Single(audience)
    }
}

impl From<Vec<String>> for Audience {
    fn from(audiences: Vec<String>) -> Self {
        Audience::Many(audiences)
    }
}

/// Claims carried by a token
///
/// The reserved fields are typed; every other field (family id, role, ...) lives
/// in [`Claims::extra`] and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issued At (iat) - seconds since Unix epoch, set by the issuer
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Expiration Time (exp) - seconds since Unix epoch, `iat + lifetime`
    #[serde(rename = "exp")]
    pub expiration: i64,

    /// Not Before (nbf)
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,

    /// Issuer (iss)
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Audience (aud)
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,

    /// Caller-specific identity fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Build the authoritative claims for a new token
    ///
    /// Reserved keys in `identity` are dropped; `iat`, `exp`, `nbf`, `iss` and
    /// `aud` come only from `now` and `options`.
    pub fn issue(identity: Map<String, Value>, now: i64, options: &IssueOptions) -> Result<Self> {
        validate_lifetime(options.lifetime_seconds)?;

        let lifetime = i64::try_from(options.lifetime_seconds)
            .map_err(|_| Error::Configuration("token lifetime out of range".into()))?;
        let expiration = now
            .checked_add(lifetime)
            .ok_or_else(|| Error::Configuration("token expiry overflows".into()))?;

        if let Some(nbf) = options.not_before {
            if nbf > expiration {
                return Err(Error::Configuration(format!(
                    "not-before {nbf} is after expiry {expiration}"
                )));
            }
        }

        let mut extra = identity;
        let discarded: Vec<&str> = RESERVED_CLAIMS
            .into_iter()
            .filter(|key| extra.remove(*key).is_some())
            .collect();
        if !discarded.is_empty() {
            tracing::debug!(?discarded, "discarded reserved claims supplied by caller");
        }

        Ok(Self {
            issued_at: now,
            expiration,
            not_before: options.not_before,
            issuer: options.issuer.clone(),
            audience: options.audience.clone(),
            extra,
        })
    }

    /// Get a caller-supplied field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Get a caller-supplied field as a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Options for issuing a token
#[derive(Debug, Clone, PartialEq)]
pub struct IssueOptions {
    lifetime_seconds: u64,
    issuer: Option<String>,
    audience: Option<Audience>,
    not_before: Option<i64>,
}

impl Default for IssueOptions {
    fn default() -> Self {
        Self {
            lifetime_seconds: DEFAULT_LIFETIME_SECONDS,
            issuer: None,
            audience: None,
            not_before: None,
        }
    }
}

impl IssueOptions {
    /// Create issue options with defaults (30 day lifetime, no iss/aud)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token lifetime
    pub fn lifetime(mut self, seconds: u64) -> Self {
        self.lifetime_seconds = seconds;
        self
    }

    /// Stamp an issuer (iss)
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Stamp an audience (aud)
    pub fn audience(mut self, audience: impl Into<Audience>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Stamp a not-before time (nbf), seconds since Unix epoch
    pub fn not_before(mut self, timestamp: i64) -> Self {
        self.not_before = Some(timestamp);
        self
    }

    pub fn lifetime_seconds(&self) -> u64 {
        self.lifetime_seconds
    }
}
