//! # Transaction Builder Service

use crate::algorithms::build_query_proof;
use crate::domain::{BuilderError, PreparedIssuance, PreparedPayment};
use qc_03_wallet::{Keychain, PendingSpend, Wallet};
use shared_crypto::Key;
use shared_types::{short_id, KeyId, OutputTx, Tx, TxCore};

/// Builds payments and issuances against a fixed issuer id.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    issuer_id: KeyId,
}

impl TransactionBuilder {
    /// Create a builder; `issuer_id` is the directory's issuer key id.
    pub fn new(issuer_id: KeyId) -> Self {
        Self { issuer_id }
    }

    /// Issuer key id this builder accepts.
    pub fn issuer_id(&self) -> &KeyId {
        &self.issuer_id
    }

    /// Pay `value` to `dest`, returning any leftover to `change`.
    ///
    /// Selects confirmed entries smallest-first, signs a spend proof with
    /// the owners' keys and stages the spend in `wallet`. Nothing is staged
    /// if any step fails.
    pub fn build_payment(
        &self,
        wallet: &mut Wallet,
        keychain: &Keychain,
        value: u64,
        dest: KeyId,
        change: KeyId,
    ) -> Result<PreparedPayment, BuilderError> {
        if value == 0 {
            return Err(BuilderError::InvalidValue);
        }

        let selection = wallet.select_for_value(value);
        let leftover = selection
            .change(value)
            .ok_or(BuilderError::InsufficientBalance {
                requested: value,
                available: selection.accumulated,
            })?;

        let mut referenced = Vec::with_capacity(selection.entries.len());
        let mut keys: Vec<&Key> = Vec::with_capacity(selection.entries.len());
        for entry in &selection.entries {
            let key = keychain
                .signing_key(entry.key_id())
                .ok_or_else(|| BuilderError::MissingKey(short_id(entry.key_id())))?;
            let raw = wallet
                .raw_tx(entry)
                .ok_or_else(|| BuilderError::ReferenceMismatch {
                    index: referenced.len(),
                })?;
            referenced.push(raw.to_vec());
            keys.push(key);
        }

        let inputs = selection
            .entries
            .iter()
            .map(|e| e.locator.as_input())
            .collect();
        let mut outputs = vec![OutputTx::new(dest, value)?];
        if leftover > 0 {
            outputs.push(OutputTx::new(change, leftover)?);
        }
        let tx = Tx::new(inputs, outputs)?;
        let core = build_query_proof(&tx, &referenced, &keys)?;

        let tx_id = tx.id()?;
        wallet.stage_spend(tx_id, tx.serialize()?, &selection.entries)?;
        tracing::info!(
            tx_id = %short_id(&tx_id),
            "[qc-04] Built payment of {} from {} inputs (change {})",
            value,
            selection.entries.len(),
            leftover
        );

        Ok(PreparedPayment {
            tx,
            core,
            spent: selection.entries,
            change: leftover,
        })
    }

    /// Rebuild the Query/Commit core of a spend already staged in a wallet.
    ///
    /// Ed25519 signatures are deterministic, so the result is the core
    /// originally built for the spend. The wallet is not touched.
    pub fn rebuild_payment(
        &self,
        pending: &PendingSpend,
        keychain: &Keychain,
    ) -> Result<TxCore, BuilderError> {
        let tx = Tx::parse(&pending.raw_tx)?;
        let mut referenced = Vec::with_capacity(tx.inputs.len());
        let mut keys: Vec<&Key> = Vec::with_capacity(tx.inputs.len());
        for (index, input) in tx.inputs.iter().enumerate() {
            let (entry, raw) = pending
                .spent
                .iter()
                .find(|(e, _)| e.locator.as_input() == *input)
                .ok_or(BuilderError::ReferenceMismatch { index })?;
            let key = keychain
                .signing_key(entry.key_id())
                .ok_or_else(|| BuilderError::MissingKey(short_id(entry.key_id())))?;
            referenced.push(raw.clone());
            keys.push(key);
        }
        build_query_proof(&tx, &referenced, &keys)
    }

    /// Mint `value` to `dest`, authorised by `issuer_key`.
    ///
    /// Fails with [`BuilderError::UnauthorizedIssuer`] before signing if
    /// `issuer_key` is not the directory's issuer.
    pub fn build_issuance(
        &self,
        value: u64,
        dest: KeyId,
        issuer_key: &Key,
    ) -> Result<PreparedIssuance, BuilderError> {
        if value == 0 {
            return Err(BuilderError::InvalidValue);
        }
        if issuer_key.id() != self.issuer_id {
            tracing::warn!(
                "[qc-04] Key {} is not the issuer {}",
                short_id(&issuer_key.id()),
                short_id(&self.issuer_id)
            );
            return Err(BuilderError::UnauthorizedIssuer);
        }

        // No inputs: the random nonce drawn by `Tx::new` keeps repeated
        // issuances of equal value apart.
        let tx = Tx::new(vec![], vec![OutputTx::new(dest, value)?])?;
        let tx_id = tx.id()?;
        let signature = issuer_key.sign(&tx_id)?;
        let core = TxCore::from_raw(&[
            tx.serialize()?,
            issuer_key.export_public().to_vec(),
            signature.to_vec(),
        ]);

        tracing::info!(
            tx_id = %short_id(&tx_id),
            "[qc-04] Built issuance of {} to {}",
            value,
            short_id(&dest)
        );
        Ok(PreparedIssuance { tx, core })
    }
}
