//! # Wallet
//!
//! Confirmed and pending tiers of owned outputs, plus their raw creating
//! transactions (needed later as spend proofs).

use crate::adapters::file_store;
use crate::algorithms::select_ascending;
use crate::domain::{PendingSpend, Selection, WalletEntry, WalletError};
use shared_types::{short_id, KeyId, Locator, Tx, TxId};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Owned unspent outputs.
///
/// The wallet only records outputs paying to key ids it was told it owns.
/// Confirmed entries are kept in selection order.
#[derive(Debug, Clone)]
pub struct Wallet {
    path: Option<PathBuf>,
    owned: BTreeSet<KeyId>,
    confirmed: BTreeMap<WalletEntry, Vec<u8>>,
    pending: BTreeMap<TxId, PendingSpend>,
}

impl Wallet {
    /// Empty wallet with no backing file.
    pub fn in_memory<I: IntoIterator<Item = KeyId>>(owned: I) -> Self {
        Self {
            path: None,
            owned: owned.into_iter().collect(),
            confirmed: BTreeMap::new(),
            pending: BTreeMap::new(),
        }
    }

    /// Load the wallet stored at `path`; a missing file yields an empty
    /// wallet bound to that path.
    pub fn load<P, I>(path: P, owned: I) -> Result<Self, WalletError>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = KeyId>,
    {
        let path = path.as_ref().to_path_buf();
        let snapshot = file_store::read_snapshot(&path)?.unwrap_or_default();

        let wallet = Self {
            path: Some(path),
            owned: owned.into_iter().collect(),
            confirmed: snapshot.confirmed.into_iter().collect(),
            pending: snapshot
                .pending
                .into_iter()
                .map(|p| (p.tx_id, p))
                .collect(),
        };
        tracing::debug!(
            "[qc-03] Loaded wallet: {} confirmed, {} pending",
            wallet.confirmed.len(),
            wallet.pending.len()
        );
        Ok(wallet)
    }

    /// Persist the full state. No-op for an in-memory wallet.
    pub fn save(&self) -> Result<(), WalletError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let snapshot = file_store::Snapshot {
            confirmed: self
                .confirmed
                .iter()
                .map(|(e, raw)| (*e, raw.clone()))
                .collect(),
            pending: self.pending.values().cloned().collect(),
        };
        file_store::write_snapshot(path, &snapshot)
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether outputs paying to `key_id` are recorded.
    pub fn is_owned(&self, key_id: &KeyId) -> bool {
        self.owned.contains(key_id)
    }

    /// Record every locally owned output of `raw_tx` as confirmed.
    ///
    /// Idempotent. Outputs already confirmed, staged as spent, or awaiting
    /// promotion are skipped. Returns the number of new entries.
    pub fn add_owned_outputs(&mut self, raw_tx: &[u8]) -> Result<usize, WalletError> {
        let tx = Tx::parse(raw_tx)?;
        let tx_id = tx.id()?;
        let known = self.known_locators();

        let mut added = 0;
        for (locator, value) in tx.owned_outputs(|k| self.owned.contains(k))? {
            if known.contains(&locator) {
                continue;
            }
            let entry = WalletEntry { value, locator };
            self.confirmed.insert(entry, raw_tx.to_vec());
            added += 1;
        }
        if added > 0 {
            tracing::debug!(
                tx_id = %short_id(&tx_id),
                "[qc-03] Recorded {} owned outputs",
                added
            );
        }
        Ok(added)
    }

    /// Delete one confirmed entry, returning its creating transaction.
    pub fn remove_entry(&mut self, entry: &WalletEntry) -> Result<Vec<u8>, WalletError> {
        self.confirmed
            .remove(entry)
            .ok_or_else(|| WalletError::UnknownLocator(describe(&entry.locator)))
    }

    /// Smallest-first selection over the confirmed entries.
    pub fn select_for_value(&self, target: u64) -> Selection {
        select_ascending(self.confirmed.keys(), target)
    }

    /// Creating transaction of a confirmed entry.
    pub fn raw_tx(&self, entry: &WalletEntry) -> Option<&[u8]> {
        self.confirmed.get(entry).map(Vec::as_slice)
    }

    /// Confirmed entries in selection order.
    pub fn entries(&self) -> impl Iterator<Item = &WalletEntry> {
        self.confirmed.keys()
    }

    /// Number of confirmed entries.
    pub fn len(&self) -> usize {
        self.confirmed.len()
    }

    /// True if nothing is confirmed.
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty()
    }

    /// Take `spent` out of the spendable set on behalf of `raw_tx`.
    ///
    /// All-or-nothing: on error the wallet is unchanged.
    pub fn stage_spend(
        &mut self,
        tx_id: TxId,
        raw_tx: Vec<u8>,
        spent: &[WalletEntry],
    ) -> Result<(), WalletError> {
        if self.pending.contains_key(&tx_id) {
            return Err(WalletError::AlreadyStaged(short_id(&tx_id)));
        }
        let tx = Tx::parse(&raw_tx)?;
        if tx.id()? != tx_id {
            return Err(WalletError::TxIdMismatch);
        }
        if let Some(missing) = spent.iter().find(|e| !self.confirmed.contains_key(e)) {
            return Err(WalletError::UnknownLocator(describe(&missing.locator)));
        }

        let spent: Vec<(WalletEntry, Vec<u8>)> = spent
            .iter()
            .filter_map(|e| self.confirmed.remove_entry(e))
            .collect();
        let incoming = tx
            .owned_outputs(|k| self.owned.contains(k))?
            .into_iter()
            .map(|(locator, value)| WalletEntry { value, locator })
            .collect();

        let pending = PendingSpend {
            tx_id,
            raw_tx,
            spent,
            incoming,
        };
        tracing::info!(
            tx_id = %short_id(&tx_id),
            "[qc-03] Staged spend of {} entries ({} value)",
            pending.spent.len(),
            pending.spent_value()
        );
        self.pending.insert(tx_id, pending);
        Ok(())
    }

    /// Finalize a staged spend: drop what it spent, confirm what it pays us.
    /// Returns the number of entries confirmed.
    pub fn promote(&mut self, tx_id: &TxId) -> Result<usize, WalletError> {
        let pending = self
            .pending
            .remove(tx_id)
            .ok_or_else(|| WalletError::UnknownPendingTx(short_id(tx_id)))?;

        let count = pending.incoming.len();
        for entry in pending.incoming {
            self.confirmed.insert(entry, pending.raw_tx.clone());
        }
        tracing::info!(
            tx_id = %short_id(tx_id),
            "[qc-03] Promoted spend, {} incoming entries confirmed",
            count
        );
        Ok(count)
    }

    /// Abandon a staged spend: restore what it spent, forget what it paid.
    /// Returns the number of entries restored.
    pub fn rollback(&mut self, tx_id: &TxId) -> Result<usize, WalletError> {
        let pending = self
            .pending
            .remove(tx_id)
            .ok_or_else(|| WalletError::UnknownPendingTx(short_id(tx_id)))?;

        let count = pending.spent.len();
        self.confirmed.extend(pending.spent);
        tracing::warn!(
            tx_id = %short_id(tx_id),
            "[qc-03] Rolled back spend, {} entries restored",
            count
        );
        Ok(count)
    }

    /// Staged spends, ordered by tx id.
    pub fn pending(&self) -> impl Iterator<Item = &PendingSpend> {
        self.pending.values()
    }

    /// The staged spend of `tx_id`, if any.
    pub fn pending_spend(&self, tx_id: &TxId) -> Option<&PendingSpend> {
        self.pending.get(tx_id)
    }

    /// Confirmed value per key id.
    pub fn balances(&self) -> BTreeMap<KeyId, u64> {
        let mut out = BTreeMap::new();
        for entry in self.confirmed.keys() {
            let total = out.entry(entry.locator.key_id).or_insert(0u64);
            *total = total.saturating_add(entry.value);
        }
        out
    }

    /// Value awaiting promotion per key id.
    pub fn pending_balances(&self) -> BTreeMap<KeyId, u64> {
        let mut out = BTreeMap::new();
        for entry in self.pending.values().flat_map(|p| p.incoming.iter()) {
            let total = out.entry(entry.locator.key_id).or_insert(0u64);
            *total = total.saturating_add(entry.value);
        }
        out
    }

    fn known_locators(&self) -> BTreeSet<Locator> {
        let confirmed = self.confirmed.keys().map(|e| e.locator);
        let staged = self.pending.values().flat_map(|p| {
            p.spent
                .iter()
                .map(|(e, _)| e.locator)
                .chain(p.incoming.iter().map(|e| e.locator))
        });
        confirmed.chain(staged).collect()
    }
}

fn describe(locator: &Locator) -> String {
    format!("{}:{}", short_id(&locator.tx_id), locator.index)
}
