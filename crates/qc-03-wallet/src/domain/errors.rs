//! # Domain Errors

use shared_crypto::CryptoError;
use shared_types::{EncodingError, TxError};
use thiserror::Error;

/// Wallet error types.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Snapshot file I/O error.
    #[error("Wallet I/O error on {path}: {error}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        error: String,
    },

    /// Snapshot could not be decoded.
    #[error("Corrupt wallet snapshot: {0}")]
    Corrupt(String),

    /// Transaction bytes could not be parsed.
    #[error("Invalid transaction: {0}")]
    Tx(#[from] TxError),

    /// No confirmed entry at this locator.
    #[error("Unknown wallet entry: {0}")]
    UnknownLocator(String),

    /// A spend with this id is already staged.
    #[error("Spend already staged: {0}")]
    AlreadyStaged(String),

    /// No staged spend with this id.
    #[error("No pending spend: {0}")]
    UnknownPendingTx(String),

    /// Raw transaction does not hash to the staged id.
    #[error("Staged transaction id does not match its bytes")]
    TxIdMismatch,
}

/// Keychain error types.
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Keychain file I/O error.
    #[error("Keychain I/O error on {path}: {error}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        error: String,
    },

    /// A line is not a valid record.
    #[error("Malformed keychain line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Why it was rejected
        reason: String,
    },

    /// A secret record's id is not the id of its key.
    #[error("Key id does not match secret for `{0}`")]
    KeyMismatch(String),

    /// Name already in use.
    #[error("Address name already exists: {0}")]
    DuplicateName(String),

    /// No record with this name.
    #[error("Unknown address name: {0}")]
    UnknownName(String),

    /// Invalid address name.
    #[error("Invalid address name: {0:?}")]
    InvalidName(String),

    /// Key material rejected.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Base64 or id length error.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
