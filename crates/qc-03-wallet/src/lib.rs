//! # QC-03 Wallet
//!
//! Local custody: the set of unspent outputs owned by this client, the
//! keys that can spend them, and the on-disk stores backing both.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (domain + algorithms + adapters)
//!
//! ## Two Tiers
//!
//! ```text
//!            stage_spend                promote
//! confirmed ─────────────→ pending ───────────→ confirmed (incoming)
//!     ↑                       │
//!     └─────── rollback ──────┘
//! ```
//!
//! Only confirmed entries are spendable. A spend is staged before its
//! network round and resolved exactly once afterwards.
//!
//! ## Persistence
//!
//! | Store | Format | Durability |
//! |-------|--------|------------|
//! | Wallet | bincode snapshot | temp file + fsync + rename |
//! | Keychain | one text record per line | append |
//! | Lock | `<wallet>.lock` with PID | `fs2` advisory lock |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;

// Re-exports
pub use adapters::{KeyRecord, Keychain, LockError, WalletLock};
pub use algorithms::select_ascending;
pub use domain::{KeychainError, PendingSpend, Selection, Wallet, WalletEntry, WalletError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
