//! # Algorithms
//!
//! Pure shard selection.

mod shard_assignment;

pub use shard_assignment::{rendezvous_score, rendezvous_top_k};
