//! # Domain Entities

use qc_03_wallet::WalletEntry;
use shared_types::{Tx, TxCore};

/// A payment ready to play. Its spend is already staged in the wallet.
#[derive(Debug, Clone)]
pub struct PreparedPayment {
    /// The new transaction.
    pub tx: Tx,
    /// Query/Commit core fields.
    pub core: TxCore,
    /// Wallet entries consumed.
    pub spent: Vec<WalletEntry>,
    /// Value returned to the change address (0 if none).
    pub change: u64,
}

/// An issuance ready to play.
#[derive(Debug, Clone)]
pub struct PreparedIssuance {
    /// The new transaction.
    pub tx: Tx,
    /// Commit core fields.
    pub core: TxCore,
}
