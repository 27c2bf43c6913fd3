//! # Integration Flows
//!
//! Each module exercises one path through several subsystems at once.

mod broadcast;
mod client;
mod protocol;
mod replay;
mod sharding;
mod wallet;
