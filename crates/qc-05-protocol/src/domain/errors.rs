//! # Domain Errors

use qc_01_directory::DirectoryError;
use thiserror::Error;

/// Why a phase did not reach its quorum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuorumFailure {
    /// An authority produced no response.
    #[error("no response from {authority}")]
    Absent {
        /// Short authority id
        authority: String,
    },

    /// An authority answered with a non-OK status.
    #[error("{authority} answered {status}")]
    Rejected {
        /// Short authority id
        authority: String,
        /// Status token
        status: String,
    },

    /// An authority's response could not be understood.
    #[error("malformed response from {authority}: {reason}")]
    Malformed {
        /// Short authority id
        authority: String,
        /// Why it was rejected
        reason: String,
    },

    /// Wrong number of responses.
    #[error("{got} responses, expected {expected}")]
    WrongCount {
        /// Present responses
        got: usize,
        /// Required responses
        expected: usize,
    },
}

/// Protocol error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The directory could not produce a valid shard. Fatal.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// The core does not start with a valid transaction.
    #[error("Malformed core: {0}")]
    MalformedCore(String),

    /// Query phase failed; no Commit was attempted.
    #[error("Query failed: {0}")]
    QueryFailed(QuorumFailure),

    /// Commit phase failed.
    #[error("Commit failed: {0}")]
    CommitFailed(QuorumFailure),

    /// A commit acknowledgment is not a valid signature by a distinct
    /// member of the commit shard.
    #[error("Invalid commit signature from {authority}")]
    InvalidSignature {
        /// Short authority id
        authority: String,
    },

    /// Illegal state machine move.
    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current state
        from: String,
        /// Attempted state
        to: String,
    },
}

impl ProtocolError {
    /// Metric label for this failure.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::MalformedCore(_) => "malformed",
            Self::QueryFailed(_) => "query_failed",
            Self::CommitFailed(_) => "commit_failed",
            Self::InvalidSignature { .. } => "invalid_signature",
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }
}
