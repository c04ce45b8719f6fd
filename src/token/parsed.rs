use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::limits::{MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::secret::Secret;
use crate::token::{SEGMENT_SEPARATOR, TokenHeader, VerifiedToken};
use crate::utils::json;
use serde_json::{Map, Value};

/// A token that has been parsed but not yet verified
///
/// This is the first stage in the verification pipeline.
/// At this stage, we have:
/// - Split the token into three non-empty parts (header, payload, signature)
/// - Decoded and parsed the header JSON
/// - Decoded the payload into a JSON object
///
/// Nothing in the payload is trusted yet.
///
/// Next step: VerifiedToken (after algorithm and signature checks)
#[derive(Debug)]
pub struct ParsedToken {
    header: TokenHeader,
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
    payload: Map<String, Value>,
}

impl ParsedToken {
    /// Parse a token from a string
    ///
    /// # Example
    /// ```ignore
    /// let token = ParsedToken::from_string("eyJ...").unwrap();
    /// ```
    pub fn from_string(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split(SEGMENT_SEPARATOR);
        let header_b64 = parts.next().ok_or(Error::MalformedToken)?;
        let payload_b64 = parts.next().ok_or(Error::MalformedToken)?;
        let signature_b64 = parts.next().ok_or(Error::MalformedToken)?;
        if parts.next().is_some() {
            return Err(Error::MalformedToken);
        }
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(Error::MalformedToken);
        }

        let header: TokenHeader = json::decode_segment(header_b64, MAX_DECODED_HEADER_SIZE)?;

        // Must be a JSON object, but the reserved claims are not type-checked
        // until the signature is known to be good
        let payload: Map<String, Value> =
            json::decode_segment(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;

        Ok(Self {
            header,
            header_b64: header_b64.to_string(),
            payload_b64: payload_b64.to_string(),
            signature_b64: signature_b64.to_string(),
            payload,
        })
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get the algorithm from the header
    pub fn algorithm(&self) -> Result<Algorithm> {
        self.header.parse_algorithm()
    }

    /// Get the unverified payload
    ///
    /// Note: You should not trust this data until after signature verification!
    pub fn unverified_payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Get the signing input (header.payload)
    pub(crate) fn signing_input(&self) -> String {
        format!(
            "{}{SEGMENT_SEPARATOR}{}",
            self.header_b64, self.payload_b64
        )
    }

    /// Check the algorithm, verify the MAC and move to VerifiedToken state
    ///
    /// # Example
    /// ```ignore
    /// let verified = parsed.verify_signature(&secret)?;
    /// ```
    pub fn verify_signature(self, secret: &Secret) -> Result<VerifiedToken> {
        let algorithm = self.algorithm()?;

        algorithm.verify(&self.signing_input(), &self.signature_b64, secret.as_bytes())?;

        Ok(VerifiedToken::new(self.header, algorithm, self.payload))
    }
}
