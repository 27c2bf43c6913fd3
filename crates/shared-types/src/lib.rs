//! # Shared Types Crate
//!
//! Transaction data model and wire format shared by all subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Tx`, its inputs/outputs and its canonical
//!   encoding are defined here and nowhere else.
//! - **Canonical Encoding**: a transaction id is the digest of exactly one
//!   byte string; `Tx::parse` refuses anything that would not re-encode to
//!   the same bytes.
//! - **Opaque Proofs**: Query/Commit fields are base64 blobs at this layer.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod wire;

pub use encoding::{b64decode, b64encode, decode_id, short_id};
pub use entities::*;
pub use errors::*;
pub use wire::{ReleaseToken, Response, TxCore, WireMessage};
