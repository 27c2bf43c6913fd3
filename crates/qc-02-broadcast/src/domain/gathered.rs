//! # Gathered Responses
//!
//! Result of one broadcast round: an entry for every target, either the
//! response line or absent.

use shared_types::KeyId;
use std::collections::HashMap;

/// Outcome of a broadcast, keyed by authority id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gathered {
    entries: HashMap<KeyId, Option<String>>,
}

impl Gathered {
    /// Build from per-target outcomes.
    pub fn from_entries(entries: HashMap<KeyId, Option<String>>) -> Self {
        Self { entries }
    }

    /// Response of `id`, or `None` if it is absent or was not a target.
    pub fn get(&self, id: &KeyId) -> Option<&str> {
        self.entries.get(id).and_then(|r| r.as_deref())
    }

    /// Whether `id` was a target of this round.
    pub fn contains(&self, id: &KeyId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there were no targets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets that produced no response.
    pub fn absent_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_none()).count()
    }

    /// Present responses.
    pub fn responses(&self) -> impl Iterator<Item = (&KeyId, &str)> {
        self.entries
            .iter()
            .filter_map(|(id, r)| r.as_deref().map(|line| (id, line)))
    }

    /// Underlying map.
    pub fn into_inner(self) -> HashMap<KeyId, Option<String>> {
        self.entries
    }
}
