//! # Shared Crypto - Key Capability
//!
//! The client consumes cryptography as an opaque capability: a [`Key`] can
//! name itself, sign and verify. Nothing above this crate depends on the
//! concrete curve.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Key ids, transaction ids |
//! | `key` | Ed25519 | Ownership proofs, issuance, mintette acknowledgments |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod key;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Digest32};
pub use key::{Key, PUBLIC_KEY_LEN, SECRET_KEY_LEN, SIGNATURE_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
