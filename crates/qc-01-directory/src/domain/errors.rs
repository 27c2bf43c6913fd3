//! # Domain Errors
//!
//! Error types for the Authority Directory subsystem.

use thiserror::Error;

/// Directory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Two authorities share an id.
    #[error("Duplicate authority id: {0}")]
    DuplicateAuthority(String),

    /// Not enough authorities to form a single shard.
    #[error("Directory too small: {got} authorities, need at least {required}")]
    TooFewAuthorities {
        /// Authorities configured
        got: usize,
        /// Minimum required
        required: usize,
    },

    /// The shard function did not return exactly a quorum of distinct
    /// authorities. Fatal: the directory and the shard function disagree.
    #[error("Directory inconsistency: shard has {got} distinct authorities, expected {expected}")]
    Inconsistency {
        /// Distinct authorities returned
        got: usize,
        /// Quorum size
        expected: usize,
    },
}
