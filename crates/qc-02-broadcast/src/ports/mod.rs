//! # Ports

mod outbound;

pub use outbound::{Transport, TransportError};
