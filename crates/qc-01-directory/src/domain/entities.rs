//! # Domain Entities
//!
//! [`Authority`] and [`Directory`].

use crate::algorithms::rendezvous_top_k;
use crate::domain::DirectoryError;
use shared_types::{short_id, KeyId};
use std::collections::BTreeSet;
use std::fmt;

/// Number of authorities in every shard.
pub const QUORUM_SIZE: usize = 3;

/// Version of the shard function, mixed into every score.
pub const SHARD_SCHEME_VERSION: u8 = 1;

/// A mintette: signing key id and network endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    /// Key id of the mintette's signing key.
    pub id: KeyId,
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Authority {
    /// Create an authority.
    pub fn new(id: KeyId, host: impl Into<String>, port: u16) -> Self {
        Self {
            id,
            host: host.into(),
            port,
        }
    }

    /// `host:port` form for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", short_id(&self.id), self.host, self.port)
    }
}

/// Immutable roster of authorities plus the issuer key id.
///
/// Authorities are kept sorted by id; every query result is returned in
/// that order.
#[derive(Debug, Clone)]
pub struct Directory {
    authorities: Vec<Authority>,
    ids: Vec<KeyId>,
    issuer: KeyId,
}

impl Directory {
    /// Build a directory.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::DuplicateAuthority`] if two entries share an id
    /// - [`DirectoryError::TooFewAuthorities`] if fewer than [`QUORUM_SIZE`]
    pub fn new(mut authorities: Vec<Authority>, issuer: KeyId) -> Result<Self, DirectoryError> {
        authorities.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(pair) = authorities.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(DirectoryError::DuplicateAuthority(short_id(&pair[0].id)));
        }
        if authorities.len() < QUORUM_SIZE {
            return Err(DirectoryError::TooFewAuthorities {
                got: authorities.len(),
                required: QUORUM_SIZE,
            });
        }

        let ids = authorities.iter().map(|a| a.id).collect();
        Ok(Self {
            authorities,
            ids,
            issuer,
        })
    }

    /// The shard of `id`: exactly [`QUORUM_SIZE`] distinct authorities, in
    /// directory order.
    ///
    /// `id` is either a transaction id or an input locator.
    pub fn authorities_for(&self, id: &[u8]) -> Result<Vec<Authority>, DirectoryError> {
        let mut picked = rendezvous_top_k(id, &self.ids, QUORUM_SIZE);
        picked.sort_unstable();
        picked.dedup();

        if picked.len() != QUORUM_SIZE {
            tracing::error!(
                "[qc-01] Shard function returned {} authorities for a {}-byte id",
                picked.len(),
                id.len()
            );
            return Err(DirectoryError::Inconsistency {
                got: picked.len(),
                expected: QUORUM_SIZE,
            });
        }

        Ok(picked
            .into_iter()
            .map(|i| self.authorities[i].clone())
            .collect())
    }

    /// Union of the shards of several ids, deduplicated, in directory order.
    pub fn authorities_for_all<I, B>(&self, ids: I) -> Result<Vec<Authority>, DirectoryError>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut union = BTreeSet::new();
        for id in ids {
            for authority in self.authorities_for(id.as_ref())? {
                union.insert(authority.id);
            }
        }
        Ok(self
            .authorities
            .iter()
            .filter(|a| union.contains(&a.id))
            .cloned()
            .collect())
    }

    /// Key id authorised to sign issuance transactions.
    pub fn issuer(&self) -> &KeyId {
        &self.issuer
    }

    /// All authorities, sorted by id.
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    /// Look up an authority by id.
    pub fn get(&self, id: &KeyId) -> Option<&Authority> {
        self.ids
            .binary_search(id)
            .ok()
            .map(|i| &self.authorities[i])
    }

    /// Number of authorities.
    pub fn len(&self) -> usize {
        self.authorities.len()
    }

    /// Always false for a constructed directory.
    pub fn is_empty(&self) -> bool {
        self.authorities.is_empty()
    }
}
