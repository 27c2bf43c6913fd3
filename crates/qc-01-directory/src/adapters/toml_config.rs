//! # TOML Directory Loader
//!
//! ```toml
//! issuer = "<base64 key id>"
//!
//! [[authority]]
//! id = "<base64 key id>"
//! host = "127.0.0.1"
//! port = 8080
//! ```

use crate::domain::{Authority, Directory, DirectoryError};
use serde::Deserialize;
use shared_types::{decode_id, KeyId};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration file structure.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    issuer: String,
    #[serde(default, rename = "authority")]
    authorities: Vec<AuthorityEntry>,
}

#[derive(Debug, Deserialize)]
struct AuthorityEntry {
    id: String,
    host: String,
    port: u16,
}

/// Errors that can occur during directory loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse directory: {0}")]
    Parse(String),

    /// An id field is not a base64 32-byte key id.
    #[error("Invalid key id in `{field}`: {reason}")]
    InvalidId {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// The parsed roster is not a valid directory.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// TOML-based directory provider.
pub struct DirectoryConfig;

impl DirectoryConfig {
    /// Load a directory from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Directory, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        let directory = Self::parse(&content)?;
        tracing::info!(
            "[qc-01] Loaded directory with {} authorities from {}",
            directory.len(),
            path.as_ref().display()
        );
        Ok(directory)
    }

    /// Parse a directory from a TOML string.
    pub fn parse(content: &str) -> Result<Directory, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let issuer = Self::parse_id("issuer", &file.issuer)?;
        let authorities = file
            .authorities
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let id = Self::parse_id(&format!("authority[{}].id", i), &entry.id)?;
                Ok(Authority::new(id, entry.host, entry.port))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Directory::new(authorities, issuer)?)
    }

    fn parse_id(field: &str, value: &str) -> Result<KeyId, ConfigError> {
        decode_id(value).map_err(|e| ConfigError::InvalidId {
            field: field.to_string(),
            reason: e.to_string(),
        })
    }
}
