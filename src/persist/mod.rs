//! File-backed persistence mirror.
//!
//! The mirror observes an [`AccountStore`] through its change hook and
//! re-serializes the full snapshot to a named JSON slot after every mutation.
//! The store itself never learns about the file; wiring happens here, at the
//! composition layer.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::account::{AccountStore, StoreSnapshot};
use crate::error::Error;
use crate::Result;

/// A durable snapshot slot backed by a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Create a slot at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a slot named `slot` under the per-user data directory
    /// (`<data dir>/credledger/<slot>.json`), creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDataDir`] if the platform has no data directory,
    /// or an I/O error if the directory cannot be created.
    pub fn in_data_dir(slot: &str) -> Result<Self> {
        let base = dirs::data_dir().ok_or(Error::NoDataDir)?.join("credledger");
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(format!("{slot}.json"))))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot from the slot.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds malformed JSON.
    pub fn load(&self) -> Result<Option<StoreSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot = StoreSnapshot::from_bytes(&bytes)?;
        debug!(
            "Loaded snapshot from {} ({} accounts)",
            self.path.display(),
            snapshot.accounts.len()
        );
        Ok(Some(snapshot))
    }

    /// Rewrite the slot with the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        fs::write(&self.path, snapshot.to_bytes()?)?;
        debug!(
            "Saved snapshot to {} ({} accounts)",
            self.path.display(),
            snapshot.accounts.len()
        );
        Ok(())
    }

    /// Register this slot as the store's change hook.
    ///
    /// After every mutation the full snapshot is rewritten. A failed write is
    /// logged and swallowed; the mirror is an observer, not a transaction
    /// participant, and must not poison the in-memory state.
    pub fn attach(self, store: &mut AccountStore) {
        store.set_change_hook(Box::new(move |accounts| {
            let snapshot = StoreSnapshot::new(accounts.to_vec());
            if let Err(e) = self.save(&snapshot) {
                warn!("Failed to persist snapshot to {}: {e}", self.path.display());
            }
        }));
    }
}

/// Open a store seeded from the slot and mirrored back into it.
///
/// This is the application bootstrap: an empty slot yields an empty store,
/// an existing one is restored wholesale, and every subsequent mutation
/// re-saves the snapshot.
///
/// # Errors
///
/// Returns an error if an existing slot cannot be read or parsed.
pub fn open_persisted(file: SnapshotFile) -> Result<AccountStore> {
    let mut store = match file.load()? {
        Some(snapshot) => AccountStore::from_snapshot(snapshot),
        None => AccountStore::new(),
    };
    file.attach(&mut store);
    Ok(store)
}
