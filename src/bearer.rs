//! `Authorization` header parsing

/// Authentication scheme expected in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from an `Authorization: Bearer <token>` header value
///
/// The scheme keyword matches case-insensitively and must be followed by
/// whitespace. Returns `None` when the header is absent, uses another scheme,
/// or carries no token.
///
/// # Example
/// ```
/// use famtoken::extract_bearer_token;
///
/// assert_eq!(extract_bearer_token(Some("bearer abc.def.ghi")), Some("abc.def.ghi"));
/// assert_eq!(extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
/// assert_eq!(extract_bearer_token(None), None);
/// ```
pub fn extract_bearer_token(header_value: Option<&str>) -> Option<&str> {
    let value = header_value?.trim();
    let (scheme, rest) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for header in ["bearer t", "BEARER t", "bEaReR t"] {
            assert_eq!(extract_bearer_token(Some(header)), Some("t"), "{header}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(extract_bearer_token(Some("  Bearer \t tok  ")), Some("tok"));
    }

    #[test]
    fn test_rejects_missing_or_malformed() {
        for header in [
            "",
            "Bearer",
            "Bearer   ",
            "Bearertoken",
            "Basic dXNlcjpwYXNz",
            "Token abc",
            "abc.def.ghi",
        ] {
            assert_eq!(extract_bearer_token(Some(header)), None, "{header:?}");
        }
        assert_eq!(extract_bearer_token(None), None);
    }
}
