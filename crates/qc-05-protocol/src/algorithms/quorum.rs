//! # Quorum Rules
//!
//! Both phases require unanimity from their target set. These functions
//! decide a phase from the gathered responses without doing any I/O.

use crate::domain::{CommitAck, ProtocolError, QuorumFailure};
use qc_01_directory::{Authority, QUORUM_SIZE};
use qc_02_broadcast::Gathered;
use shared_crypto::Key;
use shared_types::{short_id, ReleaseToken, Response, TxId};
use std::collections::HashSet;

/// Parse one authority's response as `OK <a> <b>`.
fn ok_pair(authority: &Authority, gathered: &Gathered) -> Result<(Vec<u8>, Vec<u8>), QuorumFailure> {
    let name = || short_id(&authority.id);
    let line = gathered
        .get(&authority.id)
        .ok_or_else(|| QuorumFailure::Absent { authority: name() })?;

    let response = Response::parse(line).map_err(|e| QuorumFailure::Malformed {
        authority: name(),
        reason: e.to_string(),
    })?;
    match response.ok_pair() {
        Ok(Some((a, b))) => Ok((a.to_vec(), b.to_vec())),
        Ok(None) => Err(QuorumFailure::Rejected {
            authority: name(),
            status: response.status().to_string(),
        }),
        Err(e) => Err(QuorumFailure::Malformed {
            authority: name(),
            reason: e.to_string(),
        }),
    }
}

/// Query phase decision.
///
/// Every target must have answered `OK <key> <token>`. Tokens are returned
/// in target order.
pub fn collect_release_tokens(
    targets: &[Authority],
    gathered: &Gathered,
) -> Result<Vec<ReleaseToken>, QuorumFailure> {
    targets
        .iter()
        .map(|authority| {
            let (key, token) = ok_pair(authority, gathered)?;
            Ok(ReleaseToken { key, token })
        })
        .collect()
}

/// Commit phase decision.
///
/// Exactly [`QUORUM_SIZE`] targets must have answered `OK <pub> <sig>`.
/// With `verify` set, each `pub` must be the key of a distinct member of
/// `shard` and `sig` must verify over `tx_id`.
pub fn decide_commit(
    shard: &[Authority],
    gathered: &Gathered,
    tx_id: &TxId,
    verify: bool,
) -> Result<Vec<CommitAck>, ProtocolError> {
    let present = shard
        .iter()
        .filter(|a| gathered.get(&a.id).is_some())
        .count();
    if present != QUORUM_SIZE || shard.len() != QUORUM_SIZE {
        // Name the first missing authority when there is one.
        let failure = shard
            .iter()
            .find(|a| gathered.get(&a.id).is_none())
            .map(|a| QuorumFailure::Absent {
                authority: short_id(&a.id),
            })
            .unwrap_or(QuorumFailure::WrongCount {
                got: present,
                expected: QUORUM_SIZE,
            });
        return Err(ProtocolError::CommitFailed(failure));
    }

    let mut acks = Vec::with_capacity(QUORUM_SIZE);
    for authority in shard {
        let (public_key, signature) =
            ok_pair(authority, gathered).map_err(ProtocolError::CommitFailed)?;
        acks.push(CommitAck {
            authority: authority.id,
            public_key,
            signature,
        });
    }

    if verify {
        verify_acks(shard, &acks, tx_id)?;
    }
    Ok(acks)
}

fn verify_acks(shard: &[Authority], acks: &[CommitAck], tx_id: &TxId) -> Result<(), ProtocolError> {
    let members: HashSet<_> = shard.iter().map(|a| a.id).collect();
    let mut signers = HashSet::with_capacity(acks.len());

    for ack in acks {
        let invalid = || ProtocolError::InvalidSignature {
            authority: short_id(&ack.authority),
        };
        let key = Key::from_public(&ack.public_key).map_err(|_| invalid())?;
        let signer = key.id();
        if !members.contains(&signer) || !signers.insert(signer) {
            tracing::warn!(
                authority = %short_id(&ack.authority),
                "[qc-05] Commit ack signed by {} which is not a fresh shard member",
                short_id(&signer)
            );
            return Err(invalid());
        }
        key.verify(tx_id, &ack.signature).map_err(|_| invalid())?;
    }
    Ok(())
}
