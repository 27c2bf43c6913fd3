//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{KeyId, Locator, TxId};

/// One owned, unspent output.
///
/// Ordering is by value, then by locator `(tx_id, index, key_id)`: the
/// order in which [`crate::Wallet::select_for_value`] consumes entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WalletEntry {
    /// Output value. Compared first.
    pub value: u64,
    /// Where the output lives and who owns it.
    pub locator: Locator,
}

impl WalletEntry {
    /// Create an entry.
    pub fn new(tx_id: TxId, index: u32, key_id: KeyId, value: u64) -> Self {
        Self {
            value,
            locator: Locator {
                tx_id,
                index,
                key_id,
            },
        }
    }

    /// Owner key id.
    pub fn key_id(&self) -> &KeyId {
        &self.locator.key_id
    }
}

/// Entries chosen to fund a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Sum of the chosen entry values.
    pub accumulated: u64,
    /// Chosen entries, in selection order.
    pub entries: Vec<WalletEntry>,
}

impl Selection {
    /// Whether the selection pays for `target`.
    pub fn covers(&self, target: u64) -> bool {
        !self.entries.is_empty() && self.accumulated >= target
    }

    /// What remains after paying `target`, if covered.
    pub fn change(&self, target: u64) -> Option<u64> {
        if self.covers(target) {
            Some(self.accumulated - target)
        } else {
            None
        }
    }
}

/// A spend staged ahead of its network round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSpend {
    /// Id of the spending transaction.
    pub tx_id: TxId,
    /// Canonical bytes of the spending transaction.
    pub raw_tx: Vec<u8>,
    /// Confirmed entries taken out of the spendable set, with the raw bytes
    /// of the transactions that created them.
    pub spent: Vec<(WalletEntry, Vec<u8>)>,
    /// Outputs of the spending transaction owned locally.
    pub incoming: Vec<WalletEntry>,
}

impl PendingSpend {
    /// Total value leaving the spendable set.
    pub fn spent_value(&self) -> u64 {
        self.spent
            .iter()
            .fold(0u64, |acc, (e, _)| acc.saturating_add(e.value))
    }

    /// Total value that becomes spendable on promotion.
    pub fn incoming_value(&self) -> u64 {
        self.incoming
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.value))
    }
}
