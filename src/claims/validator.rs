use crate::claims::{Audience, Claims};
use crate::error::{Error, Result};
use crate::limits::DEFAULT_CLOCK_SKEW_SECONDS;
use crate::utils::bounds::add_clock_skew;

/// Configuration for token verification
///
/// Issuer and audience checks are off unless requested.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOptions {
    clock_skew_seconds: u64,
    issuer: Option<String>,
    audience: Option<String>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            clock_skew_seconds: DEFAULT_CLOCK_SKEW_SECONDS,
            issuer: None,
            audience: None,
        }
    }
}

impl VerifyOptions {
    /// Create verify options with defaults (30s skew, no iss/aud checks)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    ///
    /// # Security
    /// Clock skew is limited to prevent effectively disabling expiration checks.
    /// Maximum allowed value is 300 seconds (5 minutes); larger values make
    /// every verification fail with a configuration error.
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// Require a specific issuer
    pub fn require_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Require a specific audience
    pub fn require_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn clock_skew_seconds(&self) -> u64 {
        self.clock_skew_seconds
    }
}

/// Validate the time, issuer and audience claims of an authenticated token
///
/// Only call this once the signature has been verified. The skew bound is
/// checked by [`crate::TokenService::verify_at`] before any input is parsed.
pub fn validate_claims(claims: &Claims, options: &VerifyOptions, now: i64) -> Result<()> {
    let skew = options.clock_skew_seconds;

    // Validate expiration
    let exp_with_skew = add_clock_skew(claims.expiration, skew);
    if now > exp_with_skew {
        return Err(Error::Expired {
            expired_at: claims.expiration,
            now,
            skew,
        });
    }

    // Validate not-before
    if let Some(nbf) = claims.not_before {
        if add_clock_skew(now, skew) < nbf {
            return Err(Error::NotYetValid {
                not_before: nbf,
                now,
                skew,
            });
        }
    }

    // Validate issuer
    if let Some(expected) = &options.issuer {
        if claims.issuer.as_deref() != Some(expected.as_str()) {
            return Err(Error::BadIssuer {
                expected: expected.clone(),
                found: claims.issuer.clone(),
            });
        }
    }

    // Validate audience
    if let Some(expected) = &options.audience {
        if !claims.audience.as_ref().is_some_and(|aud| aud.contains(expected)) {
            return Err(Error::BadAudience {
                expected: expected.clone(),
                found: claims.audience.as_ref().map(Audience::to_vec).unwrap_or_default(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    const NOW: i64 = 1_700_000_000;

    fn make_claims(exp: i64, nbf: Option<i64>) -> Claims {
        Claims {
            issued_at: NOW - 10,
            expiration: exp,
            not_before: nbf,
            issuer: None,
            audience: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_valid_token() {
        let claims = make_claims(NOW + 3600, Some(NOW - 60));
        assert!(validate_claims(&claims, &VerifyOptions::default(), NOW).is_ok());
    }

    #[test]
    fn test_expired_token() {
        let claims = make_claims(NOW - 120, None);
        let result = validate_claims(&claims, &VerifyOptions::default(), NOW);
        assert!(matches!(result, Err(Error::Expired { .. })));
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = make_claims(NOW - 1, None);

        let strict = VerifyOptions::new().clock_skew(0);
        assert!(matches!(
            validate_claims(&claims, &strict, NOW),
            Err(Error::Expired { expired_at, now: NOW, skew: 0 }) if expired_at == NOW - 1
        ));

        let lenient = VerifyOptions::new().clock_skew(2);
        assert!(validate_claims(&claims, &lenient, NOW).is_ok());

        // exp == now is still valid
        let claims = make_claims(NOW, None);
        assert!(validate_claims(&claims, &strict, NOW).is_ok());
    }

    #[test]
    fn test_not_yet_valid() {
        let claims = make_claims(NOW + 3600, Some(NOW + 120));
        let result = validate_claims(&claims, &VerifyOptions::default(), NOW);
        assert!(matches!(result, Err(Error::NotYetValid { .. })));
    }

    #[test]
    fn test_not_before_within_skew() {
        let claims = make_claims(NOW + 3600, Some(NOW + 20));
        assert!(validate_claims(&claims, &VerifyOptions::new().clock_skew(30), NOW).is_ok());
        assert!(validate_claims(&claims, &VerifyOptions::new().clock_skew(10), NOW).is_err());
    }

    #[test]
    fn test_expired_checked_before_not_before() {
        let claims = make_claims(NOW - 120, Some(NOW + 120));
        let result = validate_claims(&claims, &VerifyOptions::default(), NOW);
        assert!(matches!(result, Err(Error::Expired { .. })));
    }

    #[test]
    fn test_skew_saturates_at_far_expiry() {
        let claims = make_claims(i64::MAX - 1, None);
        assert!(validate_claims(&claims, &VerifyOptions::new().clock_skew(300), i64::MAX).is_ok());
    }

    #[test]
    fn test_issuer_validation() {
        let mut claims = make_claims(NOW + 3600, None);
        claims.issuer = Some("famtoken".to_string());

        let options = VerifyOptions::new().require_issuer("famtoken");
        assert!(validate_claims(&claims, &options, NOW).is_ok());

        let options = VerifyOptions::new().require_issuer("other");
        assert!(matches!(
            validate_claims(&claims, &options, NOW),
            Err(Error::BadIssuer { .. })
        ));

        claims.issuer = None;
        let options = VerifyOptions::new().require_issuer("famtoken");
        assert!(matches!(
            validate_claims(&claims, &options, NOW),
            Err(Error::BadIssuer { found: None, .. })
        ));
    }

    #[test]
    fn test_issuer_ignored_when_not_required() {
        let mut claims = make_claims(NOW + 3600, None);
        claims.issuer = Some("anyone".to_string());
        assert!(validate_claims(&claims, &VerifyOptions::default(), NOW).is_ok());
    }

    #[test]
    fn test_audience_validation() {
        let mut claims = make_claims(NOW + 3600, None);
        claims.audience = Some(Audience::Single("web".to_string()));

        let options = VerifyOptions::new().require_audience("web");
        assert!(validate_claims(&claims, &options, NOW).is_ok());

        let options = VerifyOptions::new().require_audience("mobile");
        assert!(matches!(
            validate_claims(&claims, &options, NOW),
            Err(Error::BadAudience { .. })
        ));

        claims.audience = Some(Audience::Many(vec!["web".into(), "mobile".into()]));
        assert!(validate_claims(&claims, &options, NOW).is_ok());

        claims.audience = None;
        assert!(matches!(
            validate_claims(&claims, &options, NOW),
            Err(Error::BadAudience { found, .. }) if found.is_empty()
        ));
    }
}
