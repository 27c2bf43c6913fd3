//! # TCP Line Transport
//!
//! Opens a fresh connection per exchange, writes the request terminated by
//! `\r\n` and reads until the first line terminator.

use crate::ports::{Transport, TransportError};
use async_trait::async_trait;
use qc_01_directory::Authority;
use std::future::Future;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Default connect deadline.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for the response line.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-exchange deadlines. `None` waits forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Deadline for establishing the connection.
    pub connect_timeout: Option<Duration>,
    /// Deadline for writing the request and reading the response.
    pub response_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            response_timeout: Some(DEFAULT_RESPONSE_TIMEOUT),
        }
    }
}

impl TransportConfig {
    /// No deadlines at all: an unresponsive peer blocks its broadcast.
    pub fn unbounded() -> Self {
        Self {
            connect_timeout: None,
            response_timeout: None,
        }
    }

    /// Same deadline for both phases; zero means none.
    pub fn with_timeout(timeout: Duration) -> Self {
        if timeout.is_zero() {
            return Self::unbounded();
        }
        Self {
            connect_timeout: Some(timeout),
            response_timeout: Some(timeout),
        }
    }
}

/// Line transport over plain TCP.
#[derive(Debug, Clone, Default)]
pub struct TcpTransport {
    config: TransportConfig,
}

impl TcpTransport {
    /// Create a transport with the given deadlines.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Configured deadlines.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

async fn bounded<F: Future>(
    limit: Option<Duration>,
    phase: &'static str,
    fut: F,
) -> Result<F::Output, TransportError> {
    match limit {
        Some(after) => tokio::time::timeout(after, fut)
            .await
            .map_err(|_| TransportError::Timeout { phase, after }),
        None => Ok(fut.await),
    }
}

async fn request_response(stream: TcpStream, line: &str) -> Result<String, TransportError> {
    let (reader, mut writer) = stream.into_split();

    writer
        .write_all(format!("{}\r\n", line).as_bytes())
        .await
        .map_err(|e| TransportError::Io(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| TransportError::Io(e.to_string()))?;

    let mut reader = BufReader::new(reader);
    let mut response = String::new();
    let read = reader
        .read_line(&mut response)
        .await
        .map_err(|e| TransportError::Io(e.to_string()))?;

    if read == 0 || !response.ends_with('\n') {
        return Err(TransportError::Disconnected);
    }
    Ok(response.trim_end_matches(['\r', '\n']).to_string())
}

#[async_trait]
impl Transport for TcpTransport {
    async fn exchange(&self, target: &Authority, line: &str) -> Result<String, TransportError> {
        let address = target.address();

        let stream = bounded(
            self.config.connect_timeout,
            "connect",
            TcpStream::connect(&address),
        )
        .await?
        .map_err(|e| TransportError::ConnectionFailed {
            address: address.clone(),
            reason: e.to_string(),
        })?;

        // Best effort: request lines are small and latency bound.
        let _ = stream.set_nodelay(true);

        bounded(
            self.config.response_timeout,
            "response",
            request_response(stream, line),
        )
        .await?
    }
}
