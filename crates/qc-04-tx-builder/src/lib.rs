//! # QC-04 Transaction Builder
//!
//! Turns intents (pay, issue) into transactions plus the core fields the
//! protocol engine ships to authorities.
//!
//! **Subsystem ID:** 4
//!
//! ## Cores
//!
//! | Kind | Fields (base64) |
//! |------|-----------------|
//! | Payment | `tx, ref_tx_1..n, pub_1..n, sig_1..n` |
//! | Issuance | `tx, issuer_pub, sig` |
//!
//! Every signature is over `tx.id()`.
//!
//! ## Wallet Interaction
//!
//! A payment stages its spend in the wallet before returning. The caller
//! owns resolution: `promote` once the play is done, `rollback` otherwise.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod service;

// Re-exports
pub use algorithms::build_query_proof;
pub use domain::{BuilderError, PreparedIssuance, PreparedPayment};
pub use service::TransactionBuilder;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
