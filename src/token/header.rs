use crate::algorithm::Algorithm;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Token type written into every issued header
pub const TOKEN_TYPE: &str = "token";

/// Token header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    ///
    /// A header without `alg` decodes to an empty string and is rejected as an
    /// unsupported algorithm.
    #[serde(rename = "alg", default)]
    pub algorithm: String,

    /// Token type ("token"; older tokens wrote `typ`)
    #[serde(
        rename = "type",
        alias = "typ",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub token_type: Option<String>,
}

impl TokenHeader {
    /// Header for a token signed with `algorithm`
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            token_type: Some(TOKEN_TYPE.to_string()),
        }
    }

    /// Parse algorithm from header
    pub fn parse_algorithm(&self) -> Result<Algorithm> {
        Algorithm::from_str(&self.algorithm)
    }

    /// Get algorithm as string
    pub fn algorithm_str(&self) -> &str {
        &self.algorithm
    }
}
