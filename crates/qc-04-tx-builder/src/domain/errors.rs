//! # Domain Errors

use qc_03_wallet::WalletError;
use shared_crypto::CryptoError;
use shared_types::TxError;
use thiserror::Error;

/// Transaction builder error types.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Value must be positive.
    #[error("Value must be positive")]
    InvalidValue,

    /// Confirmed entries do not cover the payment.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Value asked for
        requested: u64,
        /// Value the selection reached
        available: u64,
    },

    /// No signing key for a selected entry.
    #[error("No signing key for address {0}")]
    MissingKey(String),

    /// Proof material does not line up with the inputs.
    #[error("Proof mismatch: {inputs} inputs, {referenced} referenced txs, {keys} keys")]
    ProofMismatch {
        /// Transaction inputs
        inputs: usize,
        /// Referenced transactions supplied
        referenced: usize,
        /// Keys supplied
        keys: usize,
    },

    /// A referenced transaction is not the one input `index` spends.
    #[error("Referenced transaction {index} does not match its input")]
    ReferenceMismatch {
        /// Input position
        index: usize,
    },

    /// Issuing key is not the directory's issuer.
    #[error("Key is not authorised to issue")]
    UnauthorizedIssuer,

    /// Transaction could not be formed.
    #[error(transparent)]
    Tx(#[from] TxError),

    /// Signing failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Wallet refused to stage the spend.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}
