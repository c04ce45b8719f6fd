//! Bounds validation utilities
//!
//! Clock-skew arithmetic and option bounds shared by issuance and verification.

use crate::error::{Error, Result};
use crate::limits::{MAX_CLOCK_SKEW_SECONDS, MAX_LIFETIME_SECONDS};

/// Add clock skew to a timestamp, saturating at `i64::MAX`
pub(crate) fn add_clock_skew(timestamp: i64, skew_seconds: u64) -> i64 {
    timestamp.saturating_add(i64::try_from(skew_seconds).unwrap_or(i64::MAX))
}

/// Reject clock skew values that would effectively disable time checks
pub(crate) fn validate_clock_skew(seconds: u64) -> Result<()> {
    if seconds > MAX_CLOCK_SKEW_SECONDS {
        return Err(Error::Configuration(format!(
            "Clock skew too large: {seconds} seconds (maximum: {MAX_CLOCK_SKEW_SECONDS} seconds)"
        )));
    }
    Ok(())
}

/// Reject token lifetimes beyond the supported maximum
pub(crate) fn validate_lifetime(seconds: u64) -> Result<()> {
    if seconds > MAX_LIFETIME_SECONDS {
        return Err(Error::Configuration(format!(
            "Token lifetime too large: {seconds} seconds (maximum: {MAX_LIFETIME_SECONDS} seconds)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_clock_skew() {
        assert_eq!(add_clock_skew(100, 30), 130);
        assert_eq!(add_clock_skew(-100, 30), -70);
    }

    #[test]
    fn test_add_clock_skew_saturates() {
        assert_eq!(add_clock_skew(i64::MAX - 1, 30), i64::MAX);
        assert_eq!(add_clock_skew(0, u64::MAX), i64::MAX);
    }

    #[test]
    fn test_option_bounds() {
        assert!(validate_clock_skew(300).is_ok());
        assert!(matches!(
            validate_clock_skew(301),
            Err(Error::Configuration(_))
        ));
        assert!(validate_lifetime(0).is_ok());
        assert!(validate_lifetime(60 * 60 * 24 * 30).is_ok());
        assert!(validate_lifetime(86400 * 367).is_err());
    }
}
