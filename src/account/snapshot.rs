//! Snapshot wire shape for the store.

use serde::{Deserialize, Serialize};

use super::model::Account;
use crate::Result;

/// A serialized copy of the full store state at a point in time.
///
/// The JSON shape is `{"accounts": [...]}`; account order in the snapshot is
/// the store's list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// The account list, in store order.
    pub accounts: Vec<Account>,
}

impl StoreSnapshot {
    /// Create a snapshot from an account list.
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Serialize the snapshot to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize a snapshot from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid JSON snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
