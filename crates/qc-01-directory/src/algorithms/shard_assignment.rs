//! # Shard Assignment Algorithm
//!
//! Rendezvous ("highest random weight") hashing generalised to top-k.
//!
//! When an authority joins, only the ids for which it scores in the top k
//! move; every other shard is untouched.

use crate::domain::SHARD_SCHEME_VERSION;
use sha3::{Digest, Keccak256};
use shared_types::KeyId;

/// Score of one candidate for one id.
pub fn rendezvous_score(id: &[u8], candidate: &KeyId) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update([SHARD_SCHEME_VERSION]);
    hasher.update(id);
    hasher.update(candidate);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Indices of the `k` highest-scoring candidates, best first.
///
/// Ties on score fall back to the candidate id. Returns fewer than `k`
/// indices only if there are fewer than `k` candidates.
pub fn rendezvous_top_k(id: &[u8], candidates: &[KeyId], k: usize) -> Vec<usize> {
    let mut scored: Vec<([u8; 32], usize)> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (rendezvous_score(id, c), i))
        .collect();

    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| candidates[a.1].cmp(&candidates[b.1]))
    });

    scored.into_iter().take(k).map(|(_, i)| i).collect()
}
