//! # Core Domain Entities
//!
//! Transactions spend outputs of earlier transactions and create new ones.
//!
//! ```text
//! Tx ──inputs──→ [InputTx(tx_id, index)]   (spends)
//!    ──outputs─→ [OutputTx(key_id, value)] (creates)
//!    ──nonce───→ [u8; 32]                  (random for issuances)
//!    ──id()────→ SHA-256(canonical bytes)
//! ```

use rand::RngCore;
use serde::{Deserialize, Serialize};
use shared_crypto::sha256;

use crate::errors::TxError;

/// A 32-byte identifier (SHA-256 digest).
pub type Id = [u8; 32];

/// Transaction identifier.
pub type TxId = Id;

/// Key identifier (digest of a public key).
pub type KeyId = Id;

/// Length of the sharding key of an input: tx id + big-endian index.
pub const INPUT_LOCATOR_LEN: usize = 36;

/// A newly created output: value locked to a key id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputTx {
    /// Destination key id.
    pub key_id: KeyId,
    /// Positive value.
    pub value: u64,
}

impl OutputTx {
    /// Create an output, rejecting zero value.
    pub fn new(key_id: KeyId, value: u64) -> Result<Self, TxError> {
        if value == 0 {
            return Err(TxError::ZeroValue { index: 0 });
        }
        Ok(Self { key_id, value })
    }
}

/// Reference to an output of an earlier transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputTx {
    /// Referenced transaction id.
    pub tx_id: TxId,
    /// Output index within that transaction.
    pub index: u32,
}

impl InputTx {
    /// Create an input reference.
    pub fn new(tx_id: TxId, index: u32) -> Self {
        Self { tx_id, index }
    }

    /// Bytes used to shard this input across authorities.
    pub fn locator_bytes(&self) -> [u8; INPUT_LOCATOR_LEN] {
        let mut out = [0u8; INPUT_LOCATOR_LEN];
        out[..32].copy_from_slice(&self.tx_id);
        out[32..].copy_from_slice(&self.index.to_be_bytes());
        out
    }
}

/// Identifies one specific output: (tx id, index, owner key id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Locator {
    /// Transaction that created the output.
    pub tx_id: TxId,
    /// Output index.
    pub index: u32,
    /// Owner key id.
    pub key_id: KeyId,
}

impl Locator {
    /// The input that spends this output.
    pub fn as_input(&self) -> InputTx {
        InputTx::new(self.tx_id, self.index)
    }
}

/// Length of the per-transaction nonce.
pub const NONCE_LEN: usize = 32;

/// A transaction: ordered inputs and outputs.
///
/// Issuance transactions have no inputs, so two issuances of the same
/// value to the same key differ only in `nonce`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    /// Spent outputs.
    pub inputs: Vec<InputTx>,
    /// Created outputs.
    pub outputs: Vec<OutputTx>,
    /// Random for issuances, zero otherwise. Part of the id.
    pub nonce: [u8; NONCE_LEN],
}

impl Tx {
    /// Create a transaction. Every output must carry value.
    ///
    /// A transaction without inputs draws a fresh random nonce; one with
    /// inputs is already unique through the outputs it spends.
    pub fn new(inputs: Vec<InputTx>, outputs: Vec<OutputTx>) -> Result<Self, TxError> {
        let mut nonce = [0u8; NONCE_LEN];
        if inputs.is_empty() {
            rand::thread_rng().fill_bytes(&mut nonce);
        }
        Self::with_nonce(inputs, outputs, nonce)
    }

    /// Create a transaction with an explicit nonce.
    pub fn with_nonce(
        inputs: Vec<InputTx>,
        outputs: Vec<OutputTx>,
        nonce: [u8; NONCE_LEN],
    ) -> Result<Self, TxError> {
        let tx = Self {
            inputs,
            outputs,
            nonce,
        };
        tx.validate()?;
        Ok(tx)
    }

    fn validate(&self) -> Result<(), TxError> {
        match self.outputs.iter().position(|o| o.value == 0) {
            Some(index) => Err(TxError::ZeroValue { index }),
            None => Ok(()),
        }
    }

    /// Canonical encoding.
    pub fn serialize(&self) -> Result<Vec<u8>, TxError> {
        bincode::serialize(self).map_err(|e| TxError::Encoding(e.to_string()))
    }

    /// Decode canonical bytes.
    ///
    /// Rejects trailing bytes and zero-value outputs so that
    /// `parse(b).serialize() == b` for every accepted `b`.
    pub fn parse(data: &[u8]) -> Result<Self, TxError> {
        let tx: Tx = bincode::deserialize(data).map_err(|e| TxError::Malformed(e.to_string()))?;
        let canonical = tx.serialize()?;
        if canonical.as_slice() != data {
            return Err(TxError::NonCanonical {
                actual: data.len(),
                canonical: canonical.len(),
            });
        }
        tx.validate()?;
        Ok(tx)
    }

    /// Transaction id: SHA-256 of the canonical encoding.
    pub fn id(&self) -> Result<TxId, TxError> {
        Ok(sha256(&self.serialize()?))
    }

    /// Issuance transactions have no inputs.
    pub fn is_issuance(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Sharding keys of every input, in input order.
    pub fn input_locators(&self) -> Vec<[u8; INPUT_LOCATOR_LEN]> {
        self.inputs.iter().map(InputTx::locator_bytes).collect()
    }

    /// Sum of all output values.
    pub fn total_output(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.value))
    }

    /// Locators of outputs paying to keys accepted by `owned`.
    pub fn owned_outputs<F>(&self, owned: F) -> Result<Vec<(Locator, u64)>, TxError>
    where
        F: Fn(&KeyId) -> bool,
    {
        let tx_id = self.id()?;
        Ok(self
            .outputs
            .iter()
            .enumerate()
            .filter(|(_, o)| owned(&o.key_id))
            .map(|(i, o)| {
                (
                    Locator {
                        tx_id,
                        index: i as u32,
                        key_id: o.key_id,
                    },
                    o.value,
                )
            })
            .collect())
    }
}
