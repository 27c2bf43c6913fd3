//! # Adapters
//!
//! On-disk stores: wallet snapshot, keychain file and process lock.

pub(crate) mod file_store;
mod keychain;
mod lock;

pub use keychain::{KeyRecord, Keychain};
pub use lock::{LockError, WalletLock};
