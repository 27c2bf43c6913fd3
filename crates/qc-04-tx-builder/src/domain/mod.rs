//! # Domain Layer

mod entities;
mod errors;

pub use entities::{PreparedIssuance, PreparedPayment};
pub use errors::BuilderError;
