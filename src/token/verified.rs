use crate::algorithm::Algorithm;
use crate::claims::{Claims, VerifyOptions, validate_claims};
use crate::error::{Error, Result};
use crate::token::{Token, TokenHeader};
use serde_json::{Map, Value};

/// A token whose signature has been cryptographically verified
///
/// This is the second stage in the verification pipeline.
/// At this stage:
/// - The token has been parsed
/// - The algorithm is the supported MAC scheme
/// - The signature has been verified
/// - The payload can now be safely type-decoded
///
/// Next step: Token (after claims validation)
#[derive(Debug)]
pub struct VerifiedToken {
    header: TokenHeader,
    algorithm: Algorithm,
    payload: Map<String, Value>,
}

impl VerifiedToken {
    pub(crate) fn new(header: TokenHeader, algorithm: Algorithm, payload: Map<String, Value>) -> Self {
        Self {
            header,
            algorithm,
            payload,
        }
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get the algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Parse the payload as typed claims
    ///
    /// This decodes the reserved claims (iat, exp, nbf, iss, aud) but does NOT
    /// validate them yet.
    pub fn parse_claims(&self) -> Result<Claims> {
        serde_json::from_value(Value::Object(self.payload.clone()))
            .map_err(|e| Error::DecodingFailed(format!("Failed to parse claims: {e}")))
    }

    /// Validate claims at time `now` and move to the final Token state
    pub fn validate(self, options: &VerifyOptions, now: i64) -> Result<Token> {
        let claims = self.parse_claims()?;

        validate_claims(&claims, options, now)?;

        Ok(Token::new(self.header, claims))
    }
}
