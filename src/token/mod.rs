// Internal modules
mod header;
mod parsed;
mod signing;
#[allow(clippy::module_inception)]
mod token;
mod verified;

// Public API exports
pub use header::TokenHeader;
pub use parsed::ParsedToken;
pub use signing::encode_token;
pub use token::Token;
pub use verified::VerifiedToken;

/// Separator between the three token segments
pub const SEGMENT_SEPARATOR: char = '.';
