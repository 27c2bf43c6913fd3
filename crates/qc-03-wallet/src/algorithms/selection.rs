//! # UTXO Selection
//!
//! Smallest-first accumulation over a deterministic order.

use crate::domain::{Selection, WalletEntry};

/// Accumulate entries in ascending order until `target` is reached.
///
/// `entries` must already be sorted by [`WalletEntry`]'s ordering. Stops at
/// the first entry that brings the sum to at least `target`; otherwise
/// returns everything.
pub fn select_ascending<'a, I>(entries: I, target: u64) -> Selection
where
    I: IntoIterator<Item = &'a WalletEntry>,
{
    let mut selection = Selection::default();
    for entry in entries {
        selection.accumulated = selection.accumulated.saturating_add(entry.value);
        selection.entries.push(*entry);
        if selection.accumulated >= target {
            break;
        }
    }
    selection
}
