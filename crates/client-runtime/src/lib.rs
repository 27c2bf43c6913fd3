//! # Quorum-Cash Client Runtime
//!
//! Wires the subsystems into the `qc-client` command line.
//!
//! ```text
//! qc-01 Directory ─┐
//! qc-03 Wallet ────┼─→ qc-04 Builder ─→ qc-05 Engine ─→ qc-02 Broadcast ─→ mintettes
//! Keychain ────────┘
//! ```
//!
//! ## Files
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | `--directory` | `QC_DIRECTORY` | `directory.toml` |
//! | `--keychain` | `QC_KEYCHAIN` | `keychain.txt` |
//! | `--wallet` | `QC_WALLET` | `activetx.wallet` |
//! | `--secret` | `QC_SECRET_KEY` | `secret.key` |
//! | `--timeout` | `QC_TIMEOUT_SECS` | 30 (0 = none) |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, GlobalArgs};
pub use commands::{Client, Resolution};
pub use config::ClientConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
