use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute an HS256 MAC
pub(crate) fn sign_hs256(signing_input: &str, secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| Error::Configuration(format!("Invalid signing secret: {e}")))?;
    mac.update(signing_input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify HS256 signature with constant-time comparison
///
/// A signature segment that is not valid Base64URL cannot match and is
/// reported as a bad signature.
pub(crate) fn verify_hs256(signing_input: &str, signature: &str, secret: &[u8]) -> Result<()> {
    let provided_signature = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)
        .map_err(|_| Error::BadSignature)?;

    let expected_signature = sign_hs256(signing_input, secret)?;

    if provided_signature.len() != expected_signature.len() {
        return Err(Error::BadSignature);
    }

    if constant_time_eq(&provided_signature, &expected_signature) {
        Ok(())
    } else {
        Err(Error::BadSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNING_INPUT: &str = "eyJhbGciOiJIUzI1NiIsInR5cGUiOiJ0b2tlbiJ9.eyJmYW1pbHlfaWQiOiJmYW1fMSJ9";

    #[test]
    fn test_hs256_known_vector() {
        // RFC 4231 test case 2
        let mac = sign_hs256("what do ya want for nothing?", b"Jefe").unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hs256_valid_signature() {
        let secret = b"s3cr3t";
        let signature = base64url::encode_bytes(sign_hs256(SIGNING_INPUT, secret).unwrap());
        assert!(verify_hs256(SIGNING_INPUT, &signature, secret).is_ok());
    }

    #[test]
    fn test_hs256_invalid_signature() {
        let wrong_signature = base64url::encode_bytes(b"wrong");
        let result = verify_hs256(SIGNING_INPUT, &wrong_signature, b"s3cr3t");
        assert!(matches!(result, Err(Error::BadSignature)));
    }

    #[test]
    fn test_hs256_wrong_secret() {
        let signature = base64url::encode_bytes(sign_hs256(SIGNING_INPUT, b"secret-a").unwrap());
        let result = verify_hs256(SIGNING_INPUT, &signature, b"secret-b");
        assert!(matches!(result, Err(Error::BadSignature)));
    }

    #[test]
    fn test_hs256_undecodable_signature() {
        let result = verify_hs256(SIGNING_INPUT, "!!!", b"s3cr3t");
        assert!(matches!(result, Err(Error::BadSignature)));
    }

    #[test]
    fn test_hs256_truncated_signature() {
        let full = sign_hs256(SIGNING_INPUT, b"s3cr3t").unwrap();
        let truncated = base64url::encode_bytes(&full[..16]);
        let result = verify_hs256(SIGNING_INPUT, &truncated, b"s3cr3t");
        assert!(matches!(result, Err(Error::BadSignature)));
    }
}
