//! # Broadcast Service
//!
//! Fan-out of one request line to many authorities.

use crate::domain::Gathered;
use crate::ports::Transport;
use futures::future::join_all;
use qc_01_directory::Authority;
use qc_telemetry::{BROADCAST_ABSENT, BROADCAST_ROUNDS};
use shared_types::short_id;
use std::collections::HashMap;
use std::sync::Arc;

/// Concurrent broadcast over a [`Transport`].
pub struct BroadcastChannel<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for BroadcastChannel<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + 'static> BroadcastChannel<T> {
    /// Create a channel over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a channel over a shared transport.
    pub fn from_arc(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `message` to every target and wait for all of them.
    ///
    /// Each target is exchanged on its own task. A target that fails to
    /// connect, disconnects, times out or panics is recorded as absent.
    /// Duplicate targets are contacted once.
    pub async fn broadcast(&self, targets: &[Authority], message: &str) -> Gathered {
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<&Authority> = targets.iter().filter(|a| seen.insert(a.id)).collect();

        let message: Arc<str> = Arc::from(message);
        let handles = unique.iter().map(|&target| {
            let transport = Arc::clone(&self.transport);
            let target = target.clone();
            let message = Arc::clone(&message);
            tokio::spawn(async move { transport.exchange(&target, &message).await })
        });
        let results = join_all(handles).await;

        let mut entries = HashMap::with_capacity(unique.len());
        for (target, result) in unique.iter().zip(results) {
            let response = match result {
                Ok(Ok(line)) => Some(line),
                Ok(Err(e)) => {
                    tracing::warn!(
                        authority = %short_id(&target.id),
                        "[qc-02] No response from {}: {}",
                        target.address(),
                        e
                    );
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        authority = %short_id(&target.id),
                        "[qc-02] Exchange task with {} aborted: {}",
                        target.address(),
                        e
                    );
                    None
                }
            };
            entries.insert(target.id, response);
        }

        let gathered = Gathered::from_entries(entries);
        BROADCAST_ROUNDS.inc();
        BROADCAST_ABSENT.inc_by(gathered.absent_count() as u64);
        tracing::debug!(
            "[qc-02] Broadcast to {} targets, {} absent",
            gathered.len(),
            gathered.absent_count()
        );
        gathered
    }
}
