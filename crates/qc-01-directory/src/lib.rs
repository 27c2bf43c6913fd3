//! # QC-01 Authority Directory
//!
//! Static roster of mintettes and the shard function that maps any id to
//! the authorities responsible for it.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (domain + algorithms + adapters)
//!
//! ## Purpose
//!
//! - Hold the set of authorities (id, host, port) and the issuer key id
//! - Map a transaction id or input locator to its shard of exactly
//!   [`QUORUM_SIZE`] authorities
//! - Load the roster from a TOML file
//!
//! ## Shard Function
//!
//! Rendezvous ("highest random weight") hashing, scheme version
//! [`SHARD_SCHEME_VERSION`]:
//!
//! ```text
//! score(a) = Keccak-256([version] || id || a.id)
//! shard(id) = top-3 authorities by score, returned in directory order
//! ```
//!
//! Changing the scheme changes every shard; the version byte is part of the
//! hash input so that two clients disagreeing on it never silently agree on
//! a subset of shards.
//!
//! ## Module Structure
//!
//! ```text
//! qc-01-directory/
//! ├── domain/          # Authority, Directory, DirectoryError
//! ├── algorithms/      # Rendezvous top-k selection
//! └── adapters/        # TOML loader
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;

// Re-exports
pub use adapters::{ConfigError, DirectoryConfig};
pub use algorithms::{rendezvous_score, rendezvous_top_k};
pub use domain::{Authority, Directory, DirectoryError, QUORUM_SIZE, SHARD_SCHEME_VERSION};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
