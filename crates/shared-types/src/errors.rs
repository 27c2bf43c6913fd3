//! # Error Types
//!
//! Errors for transaction encoding and the line protocol.

use thiserror::Error;

/// Errors building or decoding a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    /// An output carries no value.
    #[error("Output {index} has zero value")]
    ZeroValue { index: usize },

    /// Bytes are not a bincode-encoded transaction.
    #[error("Malformed transaction: {0}")]
    Malformed(String),

    /// Bytes decode but do not re-encode identically.
    #[error("Non-canonical transaction encoding ({actual} bytes, canonical {canonical})")]
    NonCanonical { actual: usize, canonical: usize },

    /// bincode refused to encode the transaction.
    #[error("Transaction encoding failed: {0}")]
    Encoding(String),
}

/// Errors decoding base64 fields and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Field is not valid base64.
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    /// Identifier has the wrong length.
    #[error("Invalid id length: expected 32, got {0}")]
    InvalidIdLength(usize),
}

/// Errors parsing a protocol line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Empty line.
    #[error("Empty message")]
    Empty,

    /// First token is not a known verb.
    #[error("Unknown verb: {0}")]
    UnknownVerb(String),

    /// Field count is missing or does not match.
    #[error("Bad field count: declared {declared}, found {found}")]
    BadFieldCount { declared: String, found: usize },

    /// Release tokens must come in (key, token) pairs.
    #[error("Unpaired release token field")]
    UnpairedReleaseToken,

    /// An OK response carried the wrong number of fields.
    #[error("Expected {expected} fields in acknowledgment, got {got}")]
    AckArity { expected: usize, got: usize },

    /// A field failed to decode.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
