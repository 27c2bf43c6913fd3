//! # Outbound Ports
//!
//! Point-to-point exchange with one authority.

use async_trait::async_trait;
use qc_01_directory::Authority;
use std::time::Duration;
use thiserror::Error;

/// Why a single exchange produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not connect.
    #[error("Connection to {address} failed: {reason}")]
    ConnectionFailed {
        /// Target address
        address: String,
        /// Underlying error
        reason: String,
    },

    /// Connection closed before a full line arrived.
    #[error("Disconnected before a full response line")]
    Disconnected,

    /// A phase exceeded its deadline.
    #[error("Timed out during {phase} after {after:?}")]
    Timeout {
        /// `connect` or `response`
        phase: &'static str,
        /// Configured limit
        after: Duration,
    },

    /// Read or write failure on an open connection.
    #[error("I/O error: {0}")]
    Io(String),

    /// Scripted failure (mock transport).
    #[error("Injected failure")]
    Injected,
}

/// One connection, one line out, one line back.
///
/// The request is given without its terminator; the returned response has
/// its terminator stripped.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Exchange a single line with `target`.
    async fn exchange(&self, target: &Authority, line: &str) -> Result<String, TransportError>;
}
