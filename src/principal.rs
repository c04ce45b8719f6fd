//! The authenticated family
//!
//! A token authenticates a whole family as one principal. The identity lives in
//! two caller claims, `family_id` and `role`.

use crate::bearer::extract_bearer_token;
use crate::claims::{Claims, VerifyOptions};
use crate::error::{Error, Result};
use crate::service::TokenService;
use serde_json::{Map, Value};
use std::fmt;

/// Claim carrying the family identifier
pub const FAMILY_ID_CLAIM: &str = "family_id";

/// Claim carrying the family role
pub const ROLE_CLAIM: &str = "role";

/// Permission level of a family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    #[default]
    Member,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Other(role) => role,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            "member" => Role::Member,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyPrincipal {
    pub family_id: String,
    pub role: Role,
}

impl FamilyPrincipal {
    pub fn new(family_id: impl Into<String>, role: Role) -> Self {
        Self {
            family_id: family_id.into(),
            role,
        }
    }

    /// Read the principal from verified claims
    ///
    /// `family_id` may be a string or an integer and is required. A missing or
    /// non-string `role` means [`Role::Member`].
    pub fn from_claims(claims: &Claims) -> Result<Self> {
        let family_id = match claims.get(FAMILY_ID_CLAIM) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) if id.is_i64() || id.is_u64() => id.to_string(),
            _ => {
                return Err(Error::DecodingFailed(format!(
                    "claim '{FAMILY_ID_CLAIM}' is missing or invalid"
                )));
            }
        };

        let role = claims
            .get_str(ROLE_CLAIM)
            .map(Role::from)
            .unwrap_or_default();

        Ok(Self { family_id, role })
    }

    /// Caller claims to pass to [`TokenService::issue`]
    pub fn identity_claims(&self) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert(FAMILY_ID_CLAIM.into(), Value::String(self.family_id.clone()));
        claims.insert(ROLE_CLAIM.into(), Value::String(self.role.to_string()));
        claims
    }
}

/// Authenticate a request from its `Authorization` header value
///
/// An absent header or one without a bearer token fails with
/// `Error::MissingToken`; everything else is [`TokenService::verify`].
pub fn authenticate(
    header_value: Option<&str>,
    service: &TokenService,
    options: &VerifyOptions,
) -> Result<FamilyPrincipal> {
    let token = extract_bearer_token(header_value).ok_or(Error::MissingToken)?;
    let verified = service.verify(token, options)?;
    FamilyPrincipal::from_claims(verified.claims())
}
