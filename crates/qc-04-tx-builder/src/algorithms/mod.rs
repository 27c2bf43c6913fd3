//! # Algorithms

mod proof;

pub use proof::build_query_proof;
