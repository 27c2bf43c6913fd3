//! # QC-05 Protocol Engine
//!
//! Drives one transaction through the two-phase exchange with the
//! authorities responsible for it.
//!
//! **Subsystem ID:** 5
//! **Architecture:** Hexagonal (domain + algorithms + services)
//!
//! ## State Machine
//!
//! ```text
//!        inputs                 all OK              3 valid acks
//! Init ─────────→ Query ─────────────────→ Commit ──────────────→ Done
//!   │  no inputs                              ↑
//!   └─────────────────────────────────────────┘
//! any non-terminal state ───────────────────────────────────────→ Failed
//! ```
//!
//! - **Query**: every authority of every input must answer `OK key token`
//! - **Commit**: exactly the 3 authorities of the tx id must answer
//!   `OK pub sig`; signatures are checked over the tx id
//! - Terminal states are final. There are no retries and partial commits
//!   are never undone.
//!
//! ## Bulk Replay
//!
//! [`ReplayPool`] plays many cores with at most K in flight.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod engine;
pub mod replay;

// Re-exports
pub use algorithms::{collect_release_tokens, decide_commit};
pub use domain::{
    CommitAck, EngineConfig, PlayOutcome, PlayState, PlayTracker, ProtocolError, QuorumFailure,
    ReplayReport,
};
pub use engine::ProtocolEngine;
pub use replay::{parse_cores, ReplayPool, DEFAULT_REPLAY_WORKERS};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
