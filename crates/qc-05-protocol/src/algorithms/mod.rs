//! # Algorithms
//!
//! Pure quorum decisions over gathered responses.

mod quorum;

pub use quorum::{collect_release_tokens, decide_commit};
