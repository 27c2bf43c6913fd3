//! # Domain Layer
//!
//! Wallet entries, the two-tier wallet and its errors.

mod entities;
mod errors;
mod wallet;

pub use entities::{PendingSpend, Selection, WalletEntry};
pub use errors::{KeychainError, WalletError};
pub use wallet::Wallet;
