//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Bytes do not encode a valid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret seed has the wrong length
    #[error("Invalid secret length: expected {expected}, got {actual}")]
    InvalidSecretLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Signature bytes have the wrong length
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signing requested on a public-only key
    #[error("Key has no secret half")]
    MissingSecret,
}
