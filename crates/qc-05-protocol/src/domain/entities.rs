//! # Domain Entities

use shared_types::{KeyId, TxId};
use std::time::Duration;

/// Engine behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Check that every commit acknowledgment is a valid signature over
    /// the tx id by a distinct member of the commit shard.
    pub verify_commit_signatures: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            verify_commit_signatures: true,
        }
    }
}

/// One accepted commit acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAck {
    /// Authority that answered.
    pub authority: KeyId,
    /// Public key carried in the acknowledgment.
    pub public_key: Vec<u8>,
    /// Signature over the tx id.
    pub signature: Vec<u8>,
}

/// Result of a play that reached [`crate::PlayState::Done`].
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    /// Committed transaction.
    pub tx_id: TxId,
    /// Wall time from start of play.
    pub elapsed: Duration,
    /// Authorities contacted in the Query phase (0 for issuance).
    pub queried: usize,
    /// Authorities that acknowledged the Commit.
    pub committed: usize,
    /// The acknowledgments, in commit shard order.
    pub acks: Vec<CommitAck>,
}

/// Summary of a bulk replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Cores played to a terminal state.
    pub completed: usize,
    /// Plays that reached Done.
    pub succeeded: usize,
    /// Plays that reached Failed.
    pub failed: usize,
    /// Highest number of plays in flight at once.
    pub peak_in_flight: usize,
    /// Total wall time.
    pub elapsed: Duration,
}
