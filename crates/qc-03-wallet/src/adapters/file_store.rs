//! # Snapshot File Store
//!
//! The wallet is persisted as a single bincode snapshot. Writes go to
//! `<file>.tmp`, are fsynced and then renamed over the target, so a reader
//! sees either the old or the new snapshot, never a torn one.

use crate::domain::{PendingSpend, WalletEntry, WalletError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Current snapshot layout version.
const SNAPSHOT_VERSION: u32 = 1;

/// Everything the wallet persists.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub confirmed: Vec<(WalletEntry, Vec<u8>)>,
    pub pending: Vec<PendingSpend>,
}

#[derive(Serialize, Deserialize)]
struct VersionedSnapshot {
    version: u32,
    snapshot: Snapshot,
}

fn io_error(path: &Path, e: std::io::Error) -> WalletError {
    WalletError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    }
}

/// `<path><suffix>`, keeping the full file name.
pub(crate) fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Read the snapshot at `path`. `Ok(None)` if the file does not exist.
pub(crate) fn read_snapshot(path: &Path) -> Result<Option<Snapshot>, WalletError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("[qc-03] No wallet file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(io_error(path, e)),
    };

    let versioned: VersionedSnapshot =
        bincode::deserialize(&bytes).map_err(|e| WalletError::Corrupt(e.to_string()))?;
    if versioned.version != SNAPSHOT_VERSION {
        return Err(WalletError::Corrupt(format!(
            "unsupported snapshot version {}",
            versioned.version
        )));
    }
    Ok(Some(versioned.snapshot))
}

/// Atomically replace the snapshot at `path`.
pub(crate) fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), WalletError> {
    #[derive(Serialize)]
    struct VersionedRef<'a> {
        version: u32,
        snapshot: &'a Snapshot,
    }

    let bytes = bincode::serialize(&VersionedRef {
        version: SNAPSHOT_VERSION,
        snapshot,
    })
    .map_err(|e| WalletError::Corrupt(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let temp_path = sibling(path, ".tmp");
    let mut file = std::fs::File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
    file.write_all(&bytes).map_err(|e| io_error(&temp_path, e))?;
    file.sync_all().map_err(|e| io_error(&temp_path, e))?;
    drop(file);

    std::fs::rename(&temp_path, path).map_err(|e| io_error(path, e))?;
    tracing::debug!(
        "[qc-03] Saved wallet snapshot ({} bytes) to {}",
        bytes.len(),
        path.display()
    );
    Ok(())
}
