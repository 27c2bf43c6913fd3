//! # Spend Proof
//!
//! For each input: the transaction it spends from, and the owner's public
//! key and signature over the new transaction's id.

use crate::domain::BuilderError;
use shared_crypto::Key;
use shared_types::{Tx, TxCore};

/// Build `[tx, ref_1..n, pub_1..n, sig_1..n]`.
///
/// `referenced[i]` must be the canonical bytes of the transaction that
/// `tx.inputs[i]` spends from, and `keys[i]` its owner's signing key.
pub fn build_query_proof(
    tx: &Tx,
    referenced: &[Vec<u8>],
    keys: &[&Key],
) -> Result<TxCore, BuilderError> {
    let n = tx.inputs.len();
    if referenced.len() != n || keys.len() != n {
        return Err(BuilderError::ProofMismatch {
            inputs: n,
            referenced: referenced.len(),
            keys: keys.len(),
        });
    }

    for (index, (input, raw)) in tx.inputs.iter().zip(referenced).enumerate() {
        if Tx::parse(raw)?.id()? != input.tx_id {
            return Err(BuilderError::ReferenceMismatch { index });
        }
    }

    let tx_id = tx.id()?;
    let mut fields: Vec<Vec<u8>> = Vec::with_capacity(1 + 3 * n);
    fields.push(tx.serialize()?);
    fields.extend(referenced.iter().cloned());
    fields.extend(keys.iter().map(|k| k.export_public().to_vec()));
    for key in keys {
        fields.push(key.sign(&tx_id)?.to_vec());
    }

    Ok(TxCore::from_raw(&fields))
}
