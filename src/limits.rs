//! Size limit constants for input validation

/// Maximum length for a token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
/// Headers carry two short fields, so anything close to this is hostile
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded claims JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// An HS256 MAC is 32 bytes; the margin only keeps decode errors distinct from length mismatches
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
/// Prevents clock skew from effectively disabling expiration checks
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

/// Maximum token lifetime (366 days)
pub(crate) const MAX_LIFETIME_SECONDS: u64 = 86400 * 366;

/// Default token lifetime (30 days)
pub(crate) const DEFAULT_LIFETIME_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Default clock skew tolerance for verification
pub(crate) const DEFAULT_CLOCK_SKEW_SECONDS: u64 = 30;
