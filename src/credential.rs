//! Salted access-code hashing
//!
//! A family's access code is never stored. Each record keeps a random salt and
//! the SHA-256 digest of `code ‖ salt`, and a login attempt is checked by
//! recomputing that digest.
//!
//! Records are looked up by the short public suffix of the code first
//! ([`lookup_suffix`]), so one attempt may have to be checked against several
//! records; see [`find_matching_record`].

use crate::error::{Error, Result};
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::TryCryptoRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Salt length in bytes
pub const SALT_LENGTH: usize = 16;

/// Number of trailing digits used to narrow record lookups
pub const LOOKUP_SUFFIX_LENGTH: usize = 4;

/// Shortest access code [`generate_access_code`] will produce
pub const MIN_ACCESS_CODE_LENGTH: usize = 4;

/// Longest access code [`generate_access_code`] will produce
pub const MAX_ACCESS_CODE_LENGTH: usize = 12;

/// Random per-record salt
///
/// Stored as its lowercase hex text; that text is what gets hashed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    pub fn from_bytes(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }

    /// Lowercase hex rendering (32 characters)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a salt previously rendered with [`Salt::to_hex`]
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut bytes = [0u8; SALT_LENGTH];
        hex::decode_to_slice(text, &mut bytes)
            .map_err(|e| Error::DecodingFailed(format!("Invalid salt: {e}")))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

/// Draw a fresh salt from the operating system's secure random source
///
/// Fails with `Error::EntropyUnavailable` when the source cannot be read.
pub fn generate_salt() -> Result<Salt> {
    generate_salt_from(&mut OsRng)
}

/// Draw a fresh salt from `rng`
pub fn generate_salt_from<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Salt> {
    let mut bytes = [0u8; SALT_LENGTH];
    fill_secure(rng, &mut bytes)?;
    Ok(Salt(bytes))
}

/// Lowercase hex SHA-256 of `code ‖ salt`
pub fn derive_hash(code: &str, salt: &str) -> String {
    hex::encode(digest(code, salt))
}

/// Check `candidate` against a stored salt and hash in constant time
///
/// A stored hash that is not 64 hex characters never matches.
pub fn verify_code(candidate: &str, salt: &str, stored_hash: &str) -> bool {
    let mut expected = [0u8; 32];
    if hex::decode_to_slice(stored_hash, &mut expected).is_err() {
        return false;
    }
    constant_time_eq(&digest(candidate, salt), &expected)
}

fn digest(code: &str, salt: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.finalize().into()
}

/// Stored credential row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: i64,
    /// Salt as hex text
    pub salt: String,
    /// Hex digest of `code ‖ salt`
    pub hash: String,
}

impl CredentialRecord {
    /// Create the record for a newly established access code
    pub fn establish(id: i64, code: &str) -> Result<Self> {
        Self::establish_with(id, code, &mut OsRng)
    }

    /// Create the record, drawing the salt from `rng`
    pub fn establish_with<R: TryCryptoRng + ?Sized>(
        id: i64,
        code: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let salt = generate_salt_from(rng)?.to_hex();
        let hash = derive_hash(code, &salt);
        Ok(Self { id, salt, hash })
    }

    /// Whether `candidate` is this record's access code
    pub fn matches(&self, candidate: &str) -> bool {
        verify_code(candidate, &self.salt, &self.hash)
    }
}

/// Find the record whose code is `candidate`
///
/// Records are tried in ascending `id` order and the first match wins, so the
/// result does not depend on the order the store returned them in. Surrounding
/// whitespace in `candidate` is ignored.
pub fn find_matching_record<'a>(
    candidate: &str,
    records: &'a [CredentialRecord],
) -> Option<&'a CredentialRecord> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    let mut ordered: Vec<&CredentialRecord> = records.iter().collect();
    ordered.sort_by_key(|record| record.id);

    let found = ordered.into_iter().find(|record| record.matches(candidate));
    tracing::debug!(
        candidates = records.len(),
        matched = found.is_some(),
        "checked access code"
    );
    found
}

/// The trailing digits used to narrow a record lookup
///
/// Codes shorter than the suffix length are returned whole.
pub fn lookup_suffix(code: &str) -> &str {
    let code = code.trim();
    let start = code
        .char_indices()
        .rev()
        .nth(LOOKUP_SUFFIX_LENGTH - 1)
        .map_or(0, |(index, _)| index);
    &code[start..]
}

/// Generate a numeric access code of `length` digits from the OS random source
pub fn generate_access_code(length: usize) -> Result<String> {
    generate_access_code_from(&mut OsRng, length)
}

/// Generate a numeric access code of `length` digits from `rng`
///
/// Bytes of 250 and above are discarded so every digit is equally likely.
pub fn generate_access_code_from<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    length: usize,
) -> Result<String> {
    if !(MIN_ACCESS_CODE_LENGTH..=MAX_ACCESS_CODE_LENGTH).contains(&length) {
        return Err(Error::Configuration(format!(
            "access code length must be between {MIN_ACCESS_CODE_LENGTH} and {MAX_ACCESS_CODE_LENGTH}, got {length}"
        )));
    }

    let mut code = String::with_capacity(length);
    let mut buf = [0u8; MAX_ACCESS_CODE_LENGTH];
    while code.len() < length {
        fill_secure(rng, &mut buf)?;
        for byte in buf.iter().filter(|byte| **byte < 250) {
            if code.len() == length {
                break;
            }
            code.push(char::from(b'0' + byte % 10));
        }
    }
    Ok(code)
}

fn fill_secure<R: TryCryptoRng + ?Sized>(rng: &mut R, dest: &mut [u8]) -> Result<()> {
    rng.try_fill_bytes(dest).map_err(|e| {
        tracing::warn!(error = %e, "secure random source failed");
        Error::EntropyUnavailable(e.to_string())
    })
}
