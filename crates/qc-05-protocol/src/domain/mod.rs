//! # Domain Layer
//!
//! Play states, outcomes and errors.

mod entities;
mod errors;
mod state;

pub use entities::{CommitAck, EngineConfig, PlayOutcome, ReplayReport};
pub use errors::{ProtocolError, QuorumFailure};
pub use state::{PlayState, PlayTracker};
