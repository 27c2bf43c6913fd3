//! # Protocol Engine
//!
//! Plays one core through Query and Commit.

use crate::algorithms::{collect_release_tokens, decide_commit};
use crate::domain::{EngineConfig, PlayOutcome, PlayState, PlayTracker, ProtocolError};
use qc_01_directory::Directory;
use qc_02_broadcast::{BroadcastChannel, Transport};
use qc_telemetry::record_play;
use shared_types::{short_id, Tx, TxCore, WireMessage};
use std::sync::Arc;

/// Query/Commit driver over a directory and a transport.
///
/// The engine holds no wallet or keychain state; callers resolve any staged
/// wallet change from the returned result.
pub struct ProtocolEngine<T: Transport> {
    directory: Arc<Directory>,
    channel: BroadcastChannel<T>,
    config: EngineConfig,
}

impl<T: Transport + 'static> ProtocolEngine<T> {
    /// Create an engine with default configuration.
    pub fn new(directory: Arc<Directory>, transport: T) -> Self {
        Self::with_config(directory, transport, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(directory: Arc<Directory>, transport: T, config: EngineConfig) -> Self {
        Self {
            directory,
            channel: BroadcastChannel::new(transport),
            config,
        }
    }

    /// Directory in use.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Broadcast channel in use.
    pub fn channel(&self) -> &BroadcastChannel<T> {
        &self.channel
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Play `core` to a terminal state.
    ///
    /// Returns the outcome on [`PlayState::Done`]; any error means the play
    /// ended in [`PlayState::Failed`].
    pub async fn play(&self, core: &TxCore) -> Result<PlayOutcome, ProtocolError> {
        let mut tracker = PlayTracker::new();
        let result = self.run(&mut tracker, core).await;

        let tx = tracker.tx_id().map(short_id).unwrap_or_else(|| "-".to_string());
        let elapsed = tracker.elapsed();
        match &result {
            Ok(outcome) => {
                record_play("done", elapsed.as_secs_f64());
                tracing::info!(
                    tx_id = %tx,
                    state = PlayState::Done.as_str(),
                    "[qc-05] Commit OK in {:?} ({} queried, {} committed)",
                    outcome.elapsed,
                    outcome.queried,
                    outcome.committed
                );
            }
            Err(e) => {
                let at = tracker.state();
                tracker.fail();
                record_play(e.label(), elapsed.as_secs_f64());
                tracing::warn!(
                    tx_id = %tx,
                    state = at.as_str(),
                    "[qc-05] Play failed: {}",
                    e
                );
            }
        }
        result
    }

    async fn run(
        &self,
        tracker: &mut PlayTracker,
        core: &TxCore,
    ) -> Result<PlayOutcome, ProtocolError> {
        // Init: parse and shard.
        let tx_bytes = core
            .tx_bytes()
            .map_err(|e| ProtocolError::MalformedCore(e.to_string()))?;
        let tx = Tx::parse(&tx_bytes).map_err(|e| ProtocolError::MalformedCore(e.to_string()))?;
        let tx_id = tx
            .id()
            .map_err(|e| ProtocolError::MalformedCore(e.to_string()))?;
        tracker.set_tx_id(tx_id);

        let query_shard = self.directory.authorities_for_all(tx.input_locators())?;
        let commit_shard = self.directory.authorities_for(&tx_id)?;

        // Query: every input authority must release.
        let release = if tx.is_issuance() {
            Vec::new()
        } else {
            tracker.transition(PlayState::Query)?;
            let message = WireMessage::Query(core.clone()).encode();
            let gathered = self.channel.broadcast(&query_shard, &message).await;
            let tokens = collect_release_tokens(&query_shard, &gathered)
                .map_err(ProtocolError::QueryFailed)?;
            tracing::debug!(
                tx_id = %short_id(&tx_id),
                "[qc-05] Query OK from {} authorities",
                query_shard.len()
            );
            tokens
        };

        // Commit: the tx id's shard must all sign.
        tracker.transition(PlayState::Commit)?;
        let message = WireMessage::Commit {
            core: core.clone(),
            release,
        }
        .encode();
        let gathered = self.channel.broadcast(&commit_shard, &message).await;
        let acks = decide_commit(
            &commit_shard,
            &gathered,
            &tx_id,
            self.config.verify_commit_signatures,
        )?;

        tracker.transition(PlayState::Done)?;
        Ok(PlayOutcome {
            tx_id,
            elapsed: tracker.elapsed(),
            queried: if tx.is_issuance() { 0 } else { query_shard.len() },
            committed: acks.len(),
            acks,
        })
    }
}
