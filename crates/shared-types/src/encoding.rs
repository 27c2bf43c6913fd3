//! # Base64 Helpers
//!
//! Every binary field on the wire, in the keychain and in the directory file
//! is standard (padded) base64.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::entities::Id;
use crate::errors::EncodingError;

/// Encode bytes as standard base64.
pub fn b64encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64.
pub fn b64decode(field: &str) -> Result<Vec<u8>, EncodingError> {
    STANDARD
        .decode(field)
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))
}

/// Decode a base64 32-byte identifier.
pub fn decode_id(field: &str) -> Result<Id, EncodingError> {
    let bytes = b64decode(field)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidIdLength(bytes.len()))
}

/// Short printable form of an id for logs.
pub fn short_id(id: &Id) -> String {
    let mut s = b64encode(id);
    s.truncate(8);
    s
}
