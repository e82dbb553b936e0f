use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;

/// Decodes the transport-encoded request body into the raw multipart bytes.
///
/// Bodies which the transport did not flag as base64 encoded are rejected
/// with [`Error::NotEncoded`](crate::Error::NotEncoded); raw multipart bodies
/// are never interpreted.
pub fn decode_body(body: &[u8], is_base64_encoded: bool) -> crate::Result<Bytes> {
    if !is_base64_encoded {
        return Err(crate::Error::NotEncoded);
    }

    general_purpose::STANDARD
        .decode(body)
        .map(Bytes::from)
        .map_err(crate::Error::DecodeBase64)
}
