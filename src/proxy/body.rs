use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::models::ProxyError;

/// Decodes the event body into the request payload.
///
/// A plain body is taken verbatim as UTF-8 bytes; an empty body gives an
/// empty payload. A base64 body is decoded with the standard, padded
/// alphabet.
///
/// # Errors
///
/// Returns [`ProxyError::BodyDecode`] if `is_base64` is set and the body is
/// not valid base64.
pub fn decode(body: &str, is_base64: bool) -> Result<Bytes, ProxyError> {
    if is_base64 {
        Ok(Bytes::from(STANDARD.decode(body)?))
    } else {
        Ok(Bytes::copy_from_slice(body.as_bytes()))
    }
}
