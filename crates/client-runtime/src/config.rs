//! Client configuration.
//!
//! Every value comes from a command-line flag, then its environment
//! variable, then the default below. Flag and env parsing is done by
//! [`crate::cli`]; this module holds the resolved result.

use crate::cli::GlobalArgs;
use qc_02_broadcast::TransportConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Authority directory (TOML)
    pub directory_path: PathBuf,
    /// Keychain file
    pub keychain_path: PathBuf,
    /// Wallet snapshot
    pub wallet_path: PathBuf,
    /// Issuer secret seed
    pub secret_path: PathBuf,
    /// Per-request response timeout; `None` waits forever
    pub response_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            directory_path: PathBuf::from("directory.toml"),
            keychain_path: PathBuf::from("keychain.txt"),
            wallet_path: PathBuf::from("activetx.wallet"),
            secret_path: PathBuf::from("secret.key"),
            response_timeout: Some(qc_02_broadcast::DEFAULT_RESPONSE_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Place every file under `dir`, keeping the default names.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            directory_path: dir.join(defaults.directory_path),
            keychain_path: dir.join(defaults.keychain_path),
            wallet_path: dir.join(defaults.wallet_path),
            secret_path: dir.join(defaults.secret_path),
            response_timeout: defaults.response_timeout,
        }
    }

    /// Transport settings for the configured timeout.
    pub fn transport_config(&self) -> TransportConfig {
        match self.response_timeout {
            Some(timeout) => TransportConfig::with_timeout(timeout),
            None => TransportConfig::unbounded(),
        }
    }
}

impl From<&GlobalArgs> for ClientConfig {
    fn from(args: &GlobalArgs) -> Self {
        let response_timeout = match args.timeout {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Self::default().response_timeout,
        };
        Self {
            directory_path: args.directory.clone(),
            keychain_path: args.keychain.clone(),
            wallet_path: args.wallet.clone(),
            secret_path: args.secret.clone(),
            response_timeout,
        }
    }
}
