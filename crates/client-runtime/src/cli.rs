//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Quorum-Cash client
#[derive(Parser, Debug)]
#[command(name = "qc-client")]
#[command(about = "Pay, issue and replay transactions against a set of mintettes")]
#[command(version)]
pub struct Cli {
    /// File locations and network settings
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Authority directory (TOML)
    #[arg(long, global = true, env = "QC_DIRECTORY", default_value = "directory.toml")]
    pub directory: PathBuf,

    /// Keychain file
    #[arg(long, global = true, env = "QC_KEYCHAIN", default_value = "keychain.txt")]
    pub keychain: PathBuf,

    /// Wallet snapshot file
    #[arg(long, global = true, env = "QC_WALLET", default_value = "activetx.wallet")]
    pub wallet: PathBuf,

    /// Issuer secret seed (base64)
    #[arg(long, global = true, env = "QC_SECRET_KEY", default_value = "secret.key")]
    pub secret: PathBuf,

    /// Per-request timeout in seconds, 0 for none
    #[arg(long, global = true, env = "QC_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the authorities in the directory
    Dir,

    /// Show spendable balance per address
    Balances,

    /// List keychain addresses
    Addresses,

    /// Generate a new signing address
    NewAddress {
        /// Address name
        name: String,
    },

    /// Record someone else's address
    ImportAddress {
        /// Address name
        name: String,
        /// Key id (base64)
        key_id: String,
    },

    /// Mint new value with the issuer key
    Issue {
        /// Amount to mint
        value: u64,
        /// Destination address name
        name: String,
        /// Print the Commit line instead of sending it
        #[arg(long)]
        mock: bool,
    },

    /// Pay from the wallet
    Pay {
        /// Amount to pay
        value: u64,
        /// Destination address name or base64 key id
        dest: String,
        /// Change address name or base64 key id
        change: String,
    },

    /// List spends awaiting resolution
    Pending,

    /// Settle a staged spend: replay it, or force promote or rollback
    Resolve {
        /// Transaction id (base64), as listed by `pending`
        tx_id: String,
        /// Mark the spend committed without contacting the network
        #[arg(long, conflicts_with = "rollback")]
        promote: bool,
        /// Return the spent entries to the wallet
        #[arg(long)]
        rollback: bool,
    },

    /// Replay a file of cores, one per line
    Play {
        /// Replay file
        file: PathBuf,
        /// Plays in flight at once
        #[arg(long, default_value_t = qc_05_protocol::DEFAULT_REPLAY_WORKERS)]
        workers: usize,
    },
}
