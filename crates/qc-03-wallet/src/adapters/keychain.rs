//! # Keychain
//!
//! Named addresses, one record per line:
//!
//! ```text
//! #<name> sec <base64 key id> <base64 secret seed>
//! #<name> pub <base64 key id>
//! ```
//!
//! `sec` records can sign and mark their id as owned by this wallet; `pub`
//! records only name someone else's address. The file is append-only.

use crate::domain::KeychainError;
use shared_crypto::Key;
use shared_types::{b64decode, b64encode, decode_id, short_id, KeyId};
use std::collections::{BTreeSet, HashMap};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const SECRET: &str = "sec";
const PUBLIC: &str = "pub";

/// One keychain record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRecord {
    /// An address we control.
    Secret {
        /// Address name
        name: String,
        /// Signing key
        key: Key,
    },
    /// Someone else's address.
    Public {
        /// Address name
        name: String,
        /// Key id
        id: KeyId,
    },
}

impl KeyRecord {
    /// Address name.
    pub fn name(&self) -> &str {
        match self {
            Self::Secret { name, .. } | Self::Public { name, .. } => name,
        }
    }

    /// Key id.
    pub fn id(&self) -> KeyId {
        match self {
            Self::Secret { key, .. } => key.id(),
            Self::Public { id, .. } => *id,
        }
    }

    /// `sec` or `pub`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Secret { .. } => SECRET,
            Self::Public { .. } => PUBLIC,
        }
    }

    /// File representation (without terminator).
    pub fn to_line(&self) -> String {
        match self {
            Self::Secret { name, key } => {
                let seed = key
                    .export_secret()
                    .map(|s| b64encode(s.as_slice()))
                    .unwrap_or_default();
                format!("#{} {} {} {}", name, SECRET, b64encode(&key.id()), seed)
            }
            Self::Public { name, id } => format!("#{} {} {}", name, PUBLIC, b64encode(id)),
        }
    }

    fn parse(line_no: usize, line: &str) -> Result<Self, KeychainError> {
        let malformed = |reason: &str| KeychainError::Malformed {
            line: line_no,
            reason: reason.to_string(),
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let name = tokens
            .first()
            .and_then(|t| t.strip_prefix('#'))
            .filter(|n| !n.is_empty())
            .ok_or_else(|| malformed("record must start with #<name>"))?
            .to_string();

        match tokens.get(1).copied() {
            Some(SECRET) if tokens.len() == 4 => {
                let id = decode_id(tokens[2])?;
                let key = Key::from_secret(&b64decode(tokens[3])?)?;
                if key.id() != id {
                    return Err(KeychainError::KeyMismatch(name));
                }
                Ok(Self::Secret { name, key })
            }
            Some(PUBLIC) if tokens.len() == 3 => Ok(Self::Public {
                name,
                id: decode_id(tokens[2])?,
            }),
            Some(SECRET) | Some(PUBLIC) => Err(malformed("wrong number of fields")),
            _ => Err(malformed("unknown record kind")),
        }
    }
}

/// Named addresses backed by an append-only file.
#[derive(Debug, Clone, Default)]
pub struct Keychain {
    path: Option<PathBuf>,
    records: Vec<KeyRecord>,
    by_name: HashMap<String, usize>,
}

impl Keychain {
    /// Empty keychain with no backing file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Parse keychain text. Blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, KeychainError> {
        let mut keychain = Self::default();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = KeyRecord::parse(i + 1, line)?;
            keychain.insert(record)?;
        }
        Ok(keychain)
    }

    /// Load the keychain at `path`; a missing file yields an empty keychain
    /// bound to that path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KeychainError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(KeychainError::Io {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })
            }
        };
        let mut keychain = Self::parse(&text)?;
        keychain.path = Some(path.to_path_buf());
        tracing::debug!(
            "[qc-03] Loaded {} keychain records from {}",
            keychain.records.len(),
            path.display()
        );
        Ok(keychain)
    }

    /// All records in file order.
    pub fn records(&self) -> &[KeyRecord] {
        &self.records
    }

    /// Record named `name`.
    pub fn by_name(&self, name: &str) -> Option<&KeyRecord> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    /// Key id of the address named `name`.
    pub fn id_of(&self, name: &str) -> Result<KeyId, KeychainError> {
        self.by_name(name)
            .map(KeyRecord::id)
            .ok_or_else(|| KeychainError::UnknownName(name.to_string()))
    }

    /// Secret record whose key id is `id`.
    pub fn by_id(&self, id: &KeyId) -> Option<&KeyRecord> {
        self.records
            .iter()
            .find(|r| matches!(r, KeyRecord::Secret { key, .. } if key.id() == *id))
    }

    /// Signing key for `id`, if we hold its secret.
    pub fn signing_key(&self, id: &KeyId) -> Option<&Key> {
        match self.by_id(id) {
            Some(KeyRecord::Secret { key, .. }) => Some(key),
            _ => None,
        }
    }

    /// Display name for `id`: the secret record's name, else any record's.
    pub fn name_of(&self, id: &KeyId) -> Option<&str> {
        self.by_id(id)
            .or_else(|| self.records.iter().find(|r| r.id() == *id))
            .map(KeyRecord::name)
    }

    /// Ids of every address we can spend from.
    pub fn owned_ids(&self) -> BTreeSet<KeyId> {
        self.records
            .iter()
            .filter_map(|r| match r {
                KeyRecord::Secret { key, .. } => Some(key.id()),
                KeyRecord::Public { .. } => None,
            })
            .collect()
    }

    /// Generate a fresh signing key under `name` and persist it.
    pub fn create_address(&mut self, name: &str) -> Result<&KeyRecord, KeychainError> {
        Self::validate_name(name)?;
        self.append(KeyRecord::Secret {
            name: name.to_string(),
            key: Key::generate(),
        })
    }

    /// Name someone else's key id and persist it.
    pub fn import_address(&mut self, name: &str, id: KeyId) -> Result<&KeyRecord, KeychainError> {
        Self::validate_name(name)?;
        self.append(KeyRecord::Public {
            name: name.to_string(),
            id,
        })
    }

    fn validate_name(name: &str) -> Result<(), KeychainError> {
        if name.is_empty() || name.starts_with('#') || name.chars().any(char::is_whitespace) {
            return Err(KeychainError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    fn insert(&mut self, record: KeyRecord) -> Result<usize, KeychainError> {
        if self.by_name.contains_key(record.name()) {
            return Err(KeychainError::DuplicateName(record.name().to_string()));
        }
        let index = self.records.len();
        self.by_name.insert(record.name().to_string(), index);
        self.records.push(record);
        Ok(index)
    }

    fn append(&mut self, record: KeyRecord) -> Result<&KeyRecord, KeychainError> {
        if self.by_name.contains_key(record.name()) {
            return Err(KeychainError::DuplicateName(record.name().to_string()));
        }
        if let Some(path) = &self.path {
            let io_error = |e: std::io::Error| KeychainError::Io {
                path: path.display().to_string(),
                error: e.to_string(),
            };
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(io_error)?;
            writeln!(file, "{}", record.to_line()).map_err(io_error)?;
            file.sync_all().map_err(io_error)?;
        }
        tracing::info!(
            "[qc-03] Added {} address {} ({})",
            record.kind(),
            record.name(),
            short_id(&record.id())
        );
        let index = self.insert(record)?;
        Ok(&self.records[index])
    }
}
