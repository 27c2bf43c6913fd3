//! # Adapters
//!
//! Loading a [`crate::Directory`] from disk.

mod toml_config;

pub use toml_config::{ConfigError, DirectoryConfig};
