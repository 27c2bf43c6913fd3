//! # SHA-256 Digests
//!
//! Key ids and transaction ids are SHA-256 digests.

use sha2::{Digest, Sha256};

/// 32-byte digest output.
pub type Digest32 = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Digest32 {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Sha256::digest(data));
    output
}

/// Hash the concatenation of several inputs.
pub fn sha256_many(inputs: &[&[u8]]) -> Digest32 {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}
