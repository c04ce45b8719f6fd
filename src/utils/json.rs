//! JSON segment helpers
//!
//! A token segment is a JSON document serialized to bytes and then Base64URL
//! encoded. These helpers do both steps in one call.

use crate::error::{Error, Result};
use crate::utils::base64url;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a value to JSON and encode it as a Base64URL segment
pub fn encode_segment<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = serde_json::to_vec(value)
        .map_err(|e| Error::Configuration(format!("Failed to serialize token segment: {e}")))?;
    Ok(base64url::encode_bytes(bytes))
}

/// Decode a Base64URL segment and parse its JSON content
pub fn decode_segment<T: DeserializeOwned>(segment: &str, max_size: usize) -> Result<T> {
    let bytes = base64url::decode_bytes(segment, max_size)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::DecodingFailed(format!("JSON parsing failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    #[test]
    fn test_encode_segment_is_compact_json() {
        let segment = encode_segment(&json!({"a": 1})).unwrap();
        assert_eq!(base64url::decode_bytes(&segment, 100).unwrap(), br#"{"a":1}"#);
    }

    #[test]
    fn test_decode_segment_object() {
        let segment = base64url::encode_bytes(br#"{"family_id":"fam_1"}"#);
        let map: Map<String, Value> = decode_segment(&segment, 100).unwrap();
        assert_eq!(map["family_id"], "fam_1");
    }

    #[test]
    fn test_decode_segment_rejects_non_object() {
        let segment = base64url::encode_bytes(b"[1,2,3]");
        let result = decode_segment::<Map<String, Value>>(&segment, 100);
        assert!(matches!(result, Err(Error::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_segment_rejects_garbage() {
        let segment = base64url::encode_bytes(b"not json");
        let result = decode_segment::<Value>(&segment, 100);
        assert!(matches!(result, Err(Error::DecodingFailed(_))));
    }
}
