//! # Adapters
//!
//! - [`TcpTransport`]: production line transport over TCP
//! - [`MockTransport`]: in-memory scripted transport for tests

mod mock;
mod tcp;

pub use mock::{MockReply, MockTransport};
pub use tcp::{TcpTransport, TransportConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_RESPONSE_TIMEOUT};
