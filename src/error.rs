//! Error types for the store and its persistence mirror.

use thiserror::Error;

use crate::account::AccountId;

/// Errors that can occur in store and persistence operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An account with this id already exists in the store.
    #[error("Duplicate account id: {0}")]
    DuplicateAccountId(AccountId),

    /// No per-user data directory could be resolved on this platform.
    #[error("No data directory available")]
    NoDataDir,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
