//! # Mock Transport
//!
//! In-memory transport driven by a closure. Records every request and the
//! peak number of exchanges in flight at once.

use crate::ports::{Transport, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use qc_01_directory::Authority;
use shared_types::KeyId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted reply to one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Answer immediately with this line.
    Respond(String),
    /// Answer with this line after a delay.
    Delayed(Duration, String),
    /// Fail the exchange (target becomes absent).
    Fail,
    /// Never answer.
    Hang,
}

type Script = dyn Fn(&Authority, &str) -> MockReply + Send + Sync;

/// Closure-scripted transport.
///
/// Clones share the script, the request log and the in-flight counters.
#[derive(Clone)]
pub struct MockTransport {
    script: Arc<Script>,
    requests: Arc<Mutex<Vec<(KeyId, String)>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl MockTransport {
    /// Create a transport answering with `script`.
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&Authority, &str) -> MockReply + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            requests: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<(KeyId, String)> {
        self.requests.lock().clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Highest number of concurrent exchanges observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn exchange(&self, target: &Authority, line: &str) -> Result<String, TransportError> {
        self.requests.lock().push((target.id, line.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match (self.script)(target, line) {
            MockReply::Respond(response) => {
                // Yield so concurrent callers overlap.
                tokio::task::yield_now().await;
                Ok(response)
            }
            MockReply::Delayed(delay, response) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            MockReply::Fail => Err(TransportError::Injected),
            MockReply::Hang => {
                std::future::pending::<()>().await;
                Err(TransportError::Disconnected)
            }
        }
    }
}
