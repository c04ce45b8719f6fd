use crate::algorithm::Algorithm;
use crate::claims::Claims;
use crate::error::Result;
use crate::secret::Secret;
use crate::token::{SEGMENT_SEPARATOR, TokenHeader};
use crate::utils::{base64url, json};

/// Serialize and sign `claims` into the compact `header.claims.mac` form
///
/// The output is deterministic for a given claims value and secret.
pub fn encode_token(claims: &Claims, secret: &Secret) -> Result<String> {
    let algorithm = Algorithm::HS256;
    let header = TokenHeader::new(algorithm);

    let header_b64 = json::encode_segment(&header)?;
    let payload_b64 = json::encode_segment(claims)?;
    let signing_input = format!("{header_b64}{SEGMENT_SEPARATOR}{payload_b64}");

    let signature = algorithm.sign(&signing_input, secret.as_bytes())?;
    let signature_b64 = base64url::encode_bytes(signature);

    Ok(format!("{signing_input}{SEGMENT_SEPARATOR}{signature_b64}"))
}
