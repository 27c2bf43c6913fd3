//! # Play State Machine

use crate::domain::ProtocolError;
use shared_types::TxId;
use std::time::{Duration, Instant};

/// State of one transaction play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PlayState {
    /// Core parsed, shards not yet contacted.
    #[default]
    Init,
    /// Waiting on input authorities.
    Query,
    /// Waiting on the commit shard.
    Commit,
    /// Committed by the full commit shard.
    Done,
    /// Abandoned.
    Failed,
}

impl PlayState {
    /// Check if transition to next state is valid.
    pub fn can_transition_to(&self, next: PlayState) -> bool {
        match (self, next) {
            (Self::Init, Self::Query) => true,
            (Self::Init, Self::Commit) => true, // Issuance skips Query
            (Self::Query, Self::Commit) => true,
            (Self::Commit, Self::Done) => true,
            (Self::Init | Self::Query | Self::Commit, Self::Failed) => true,
            _ => false,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Lowercase name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Query => "query",
            Self::Commit => "commit",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// Tracks the state of one play and enforces the transition graph.
#[derive(Debug, Clone)]
pub struct PlayTracker {
    tx_id: Option<TxId>,
    state: PlayState,
    history: Vec<PlayState>,
    started: Instant,
}

impl Default for PlayTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayTracker {
    /// Start tracking in [`PlayState::Init`].
    pub fn new() -> Self {
        Self {
            tx_id: None,
            state: PlayState::Init,
            history: vec![PlayState::Init],
            started: Instant::now(),
        }
    }

    /// Attach the transaction id once the core is parsed.
    pub fn set_tx_id(&mut self, tx_id: TxId) {
        self.tx_id = Some(tx_id);
    }

    /// Transaction id, if known.
    pub fn tx_id(&self) -> Option<&TxId> {
        self.tx_id.as_ref()
    }

    /// Move to `next`.
    pub fn transition(&mut self, next: PlayState) -> Result<(), ProtocolError> {
        if !self.state.can_transition_to(next) {
            return Err(ProtocolError::InvalidTransition {
                from: format!("{:?}", self.state),
                to: format!("{:?}", next),
            });
        }
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Move to [`PlayState::Failed`] unless already terminal.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = PlayState::Failed;
            self.history.push(PlayState::Failed);
        }
    }

    /// Current state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Every state visited, in order.
    pub fn history(&self) -> &[PlayState] {
        &self.history
    }

    /// Time since tracking started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
