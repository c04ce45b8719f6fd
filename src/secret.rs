//! Signing secret
//!
//! The secret is read-only configuration for the life of the process. Rotating it
//! invalidates every token issued under the old value.

use crate::error::{Error, Result};

/// Symmetric key used to sign and verify tokens
///
/// Construction fails on an empty key, so a missing `JWT_SECRET` surfaces as a
/// configuration error instead of silently signing with nothing.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    /// Create a secret from raw bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = secret.into();
        if bytes.is_empty() {
            return Err(Error::Configuration("signing secret is empty".into()));
        }
        Ok(Self { bytes })
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl TryFrom<&str> for Secret {
    type Error = Error;

    fn try_from(secret: &str) -> Result<Self> {
        Self::new(secret.as_bytes())
    }
}

impl TryFrom<String> for Secret {
    type Error = Error;

    fn try_from(secret: String) -> Result<Self> {
        Self::new(secret.into_bytes())
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = Error;

    fn try_from(secret: &[u8]) -> Result<Self> {
        Self::new(secret)
    }
}
