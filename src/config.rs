//! Runtime configuration
//!
//! Loaded once at startup from environment variables:
//!
//! | Variable | Default |
//! |---|---|
//! | `JWT_SECRET` | required |
//! | `TOKEN_LIFETIME_SECONDS` | `2592000` (30 days) |
//! | `TOKEN_CLOCK_SKEW_SECONDS` | `30` |
//! | `TOKEN_ISSUER` | unset |
//! | `TOKEN_AUDIENCE` | unset |
//!
//! Blank values count as unset.

use crate::claims::{IssueOptions, VerifyOptions};
use crate::error::{Error, Result};
use crate::limits::{DEFAULT_CLOCK_SKEW_SECONDS, DEFAULT_LIFETIME_SECONDS};
use crate::secret::Secret;
use crate::service::TokenService;
use crate::utils::bounds::{validate_clock_skew, validate_lifetime};

pub const SECRET_VAR: &str = "JWT_SECRET";
pub const LIFETIME_VAR: &str = "TOKEN_LIFETIME_SECONDS";
pub const CLOCK_SKEW_VAR: &str = "TOKEN_CLOCK_SKEW_SECONDS";
pub const ISSUER_VAR: &str = "TOKEN_ISSUER";
pub const AUDIENCE_VAR: &str = "TOKEN_AUDIENCE";

/// Token settings for one deployment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: Secret,
    pub token_lifetime_seconds: u64,
    pub clock_skew_seconds: u64,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = value(SECRET_VAR)
            .ok_or_else(|| Error::Configuration(format!("{SECRET_VAR} must be set")))
            .and_then(|secret| Secret::new(secret.into_bytes()))
            .inspect_err(|e| tracing::warn!(error = %e, "missing signing secret"))?;

        let token_lifetime_seconds =
            parse_seconds(LIFETIME_VAR, value(LIFETIME_VAR), DEFAULT_LIFETIME_SECONDS)?;
        validate_lifetime(token_lifetime_seconds)?;

        let clock_skew_seconds =
            parse_seconds(CLOCK_SKEW_VAR, value(CLOCK_SKEW_VAR), DEFAULT_CLOCK_SKEW_SECONDS)?;
        validate_clock_skew(clock_skew_seconds)?;

        let config = Self {
            secret,
            token_lifetime_seconds,
            clock_skew_seconds,
            issuer: value(ISSUER_VAR),
            audience: value(AUDIENCE_VAR),
        };

        tracing::debug!(
            token_lifetime_seconds,
            clock_skew_seconds,
            issuer = config.issuer.as_deref(),
            audience = config.audience.as_deref(),
            "loaded auth configuration"
        );

        Ok(config)
    }

    /// Options stamping lifetime, issuer and audience onto new tokens
    pub fn issue_options(&self) -> IssueOptions {
        let mut options = IssueOptions::new().lifetime(self.token_lifetime_seconds);
        if let Some(issuer) = &self.issuer {
            options = options.issuer(issuer.as_str());
        }
        if let Some(audience) = &self.audience {
            options = options.audience(audience.as_str());
        }
        options
    }

    /// Options checking skew, issuer and audience on incoming tokens
    pub fn verify_options(&self) -> VerifyOptions {
        let mut options = VerifyOptions::new().clock_skew(self.clock_skew_seconds);
        if let Some(issuer) = &self.issuer {
            options = options.require_issuer(issuer.as_str());
        }
        if let Some(audience) = &self.audience {
            options = options.require_audience(audience.as_str());
        }
        options
    }

    /// A wall-clock token service using the configured secret
    pub fn token_service(&self) -> TokenService {
        TokenService::new(self.secret.clone())
    }
}

fn parse_seconds(key: &str, value: Option<String>, default: u64) -> Result<u64> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
            Error::Configuration(format!(
                "{key} must be a whole number of seconds, got '{raw}': {e}"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AuthConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[(SECRET_VAR, "s3cr3t")]).unwrap();
        assert_eq!(config.secret.as_bytes(), b"s3cr3t");
        assert_eq!(config.token_lifetime_seconds, 2_592_000);
        assert_eq!(config.clock_skew_seconds, 30);
        assert_eq!(config.issuer, None);
        assert_eq!(config.audience, None);
        assert_eq!(config.issue_options(), IssueOptions::default());
        assert_eq!(config.verify_options(), VerifyOptions::default());
    }

    #[test]
    fn test_missing_or_blank_secret() {
        let cases: [&[(&str, &str)]; 3] = [&[], &[(SECRET_VAR, "")], &[(SECRET_VAR, "   ")]];
        for vars in cases {
            assert!(matches!(load(vars), Err(Error::Configuration(_))));
        }
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (SECRET_VAR, "s3cr3t"),
            (LIFETIME_VAR, "3600"),
            (CLOCK_SKEW_VAR, " 5 "),
            (ISSUER_VAR, "famtoken"),
            (AUDIENCE_VAR, "web"),
        ])
        .unwrap();

        assert_eq!(
            config.issue_options(),
            IssueOptions::new().lifetime(3600).issuer("famtoken").audience("web")
        );
        assert_eq!(
            config.verify_options(),
            VerifyOptions::new()
                .clock_skew(5)
                .require_issuer("famtoken")
                .require_audience("web")
        );
    }

    #[test]
    fn test_blank_optional_values_are_unset() {
        let config = load(&[(SECRET_VAR, "s3cr3t"), (ISSUER_VAR, ""), (LIFETIME_VAR, " ")]).unwrap();
        assert_eq!(config.issuer, None);
        assert_eq!(config.token_lifetime_seconds, 2_592_000);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        for (key, raw) in [
            (LIFETIME_VAR, "thirty days"),
            (LIFETIME_VAR, "-1"),
            (LIFETIME_VAR, "31708801"),
            (CLOCK_SKEW_VAR, "301"),
            (CLOCK_SKEW_VAR, "1.5"),
        ] {
            assert!(
                matches!(load(&[(SECRET_VAR, "s3cr3t"), (key, raw)]), Err(Error::Configuration(_))),
                "{key}={raw}"
            );
        }
    }

    #[test]
    fn test_token_service_uses_secret() {
        let config = load(&[(SECRET_VAR, "s3cr3t")]).unwrap();
        let service = config.token_service();
        let token = service
            .issue(serde_json::Map::new(), &config.issue_options())
            .unwrap();
        assert!(service.verify(&token, &config.verify_options()).is_ok());
    }
}
