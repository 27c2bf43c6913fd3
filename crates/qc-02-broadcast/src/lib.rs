//! # QC-02 Broadcast Channel
//!
//! Sends one request line to a set of authorities concurrently and gathers
//! exactly one outcome per authority.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (domain + ports + adapters)
//!
//! ## Guarantees
//!
//! - One tokio task per target; all are joined by a single aggregate await
//! - Every target resolves to a response line or to *absent*
//! - A failing target never cancels or delays its siblings beyond the
//!   aggregate await
//!
//! ## Module Structure
//!
//! ```text
//! qc-02-broadcast/
//! ├── domain/          # Gathered responses
//! ├── ports/           # Transport trait, TransportError
//! ├── adapters/        # TCP line transport, scripted mock
//! └── service.rs       # BroadcastChannel
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    MockReply, MockTransport, TcpTransport, TransportConfig, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_RESPONSE_TIMEOUT,
};
pub use domain::Gathered;
pub use ports::{Transport, TransportError};
pub use service::BroadcastChannel;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
