//! # Domain Layer
//!
//! Authorities, the directory and its errors.

mod entities;
mod errors;

pub use entities::{Authority, Directory, QUORUM_SIZE, SHARD_SCHEME_VERSION};
pub use errors::DirectoryError;
