//! # Wallet Process Locking
//!
//! Prevents two client processes from interleaving load→mutate→save on the
//! same wallet file. Uses `fs2` advisory locks on `<wallet>.lock`.

use crate::adapters::file_store::sibling;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from wallet locking
#[derive(Debug, Error)]
pub enum LockError {
    /// Lock file could not be created
    #[error("Failed to create lock file: {0}")]
    CreateFailed(std::io::Error),

    /// Wallet is already locked by another process
    #[error(
        "Wallet already in use{} ({})",
        .pid.map(|p| format!(" by process {}", p)).unwrap_or_default(),
        .path.display()
    )]
    AlreadyLocked {
        /// PID recorded by the holder, if readable
        pid: Option<u32>,
        /// Lock file path
        path: PathBuf,
    },

    /// Failed to write PID to lock file
    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(std::io::Error),
}

/// Exclusive lock on a wallet file, released on drop.
///
/// # Example
///
/// ```ignore
/// let _lock = WalletLock::acquire(Path::new("activetx.wallet"))?;
/// let mut wallet = Wallet::load("activetx.wallet", owned)?;
/// // ...
/// wallet.save()?;
/// ```
pub struct WalletLock {
    file: File,
    path: PathBuf,
    pid: u32,
}

impl WalletLock {
    /// Acquire the lock for the wallet stored at `wallet_path`.
    ///
    /// # Errors
    ///
    /// Returns `LockError::AlreadyLocked` if another process holds it.
    pub fn acquire(wallet_path: &Path) -> Result<Self, LockError> {
        let lock_path = sibling(wallet_path, ".lock");

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(LockError::CreateFailed)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        // Truncate only once the lock is ours so a holder's PID survives.
        let pid = std::process::id();
        file.set_len(0).map_err(LockError::WriteFailed)?;
        file.seek(SeekFrom::Start(0)).map_err(LockError::WriteFailed)?;
        writeln!(file, "{}", pid).map_err(LockError::WriteFailed)?;
        file.sync_all().map_err(LockError::WriteFailed)?;

        tracing::debug!("[qc-03] Acquired wallet lock {}", lock_path.display());
        Ok(Self {
            file,
            path: lock_path,
            pid,
        })
    }

    /// PID of this process
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Lock file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for WalletLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = std::fs::remove_file(&self.path);
    }
}
