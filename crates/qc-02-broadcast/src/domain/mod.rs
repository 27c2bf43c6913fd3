//! # Domain Layer

mod gathered;

pub use gathered::Gathered;
