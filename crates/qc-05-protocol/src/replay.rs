//! # Bulk Replay
//!
//! A fixed pool of workers drains a shared FIFO of cores. Each worker plays
//! one core to a terminal state before taking the next, and exits once the
//! queue is empty.

use crate::domain::{ProtocolError, ReplayReport};
use crate::engine::ProtocolEngine;
use futures::future::join_all;
use parking_lot::Mutex;
use qc_02_broadcast::Transport;
use shared_types::TxCore;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Workers used when none are configured.
pub const DEFAULT_REPLAY_WORKERS: usize = 20;

/// Parse a replay file: one whitespace-separated core per non-empty line.
pub fn parse_cores(text: &str) -> Result<Vec<TxCore>, ProtocolError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            TxCore::parse_line(line)
                .map_err(|e| ProtocolError::MalformedCore(format!("line {}: {}", i + 1, e)))
        })
        .collect()
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

/// Bounded-concurrency replay of many cores.
#[derive(Debug, Clone, Copy)]
pub struct ReplayPool {
    workers: usize,
}

impl Default for ReplayPool {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_WORKERS)
    }
}

impl ReplayPool {
    /// Pool with `workers` concurrent plays (at least one).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Configured worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Play every core, at most `workers` at a time, in FIFO order of
    /// dispatch. Returns once all cores reached a terminal state.
    pub async fn run<T: Transport + 'static>(
        &self,
        engine: Arc<ProtocolEngine<T>>,
        cores: Vec<TxCore>,
    ) -> ReplayReport {
        let started = Instant::now();
        let total = cores.len();
        let queue = Arc::new(Mutex::new(VecDeque::from(cores)));
        let counters = Arc::new(Counters::default());
        let workers = self.workers.min(total.max(1));

        tracing::info!(
            "[qc-05] Replaying {} cores with {} workers",
            total,
            workers
        );

        let handles = (0..workers).map(|worker| {
            let engine = Arc::clone(&engine);
            let queue = Arc::clone(&queue);
            let counters = Arc::clone(&counters);
            tokio::spawn(async move {
                loop {
                    let next = queue.lock().pop_front();
                    let Some(core) = next else {
                        break;
                    };

                    let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    counters.peak.fetch_max(now, Ordering::SeqCst);
                    let result = engine.play(&core).await;
                    counters.in_flight.fetch_sub(1, Ordering::SeqCst);

                    match result {
                        Ok(_) => counters.succeeded.fetch_add(1, Ordering::SeqCst),
                        Err(_) => counters.failed.fetch_add(1, Ordering::SeqCst),
                    };
                }
                tracing::debug!("[qc-05] Replay worker {} finished", worker);
            })
        });

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                tracing::error!("[qc-05] Replay worker aborted: {}", e);
            }
        }

        let succeeded = counters.succeeded.load(Ordering::SeqCst);
        let failed = counters.failed.load(Ordering::SeqCst);
        let report = ReplayReport {
            completed: succeeded + failed,
            succeeded,
            failed,
            peak_in_flight: counters.peak.load(Ordering::SeqCst),
            elapsed: started.elapsed(),
        };
        tracing::info!(
            "[qc-05] Replay finished: {}/{} done, {} failed, peak {} in flight, {:?}",
            report.succeeded,
            report.completed,
            report.failed,
            report.peak_in_flight,
            report.elapsed
        );
        report
    }
}
