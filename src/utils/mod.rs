pub mod base64url;
pub(crate) mod bounds;
pub mod json;

pub use base64url::{decode_bytes, encode_bytes};
