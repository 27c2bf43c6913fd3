//! # Algorithms

mod selection;

pub use selection::select_ascending;
