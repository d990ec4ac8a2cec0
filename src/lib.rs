//! # credledger
//!
//! Embeddable store for credential-account records with JSON snapshot
//! persistence.
//!
//! This crate provides:
//! - Account records (id, labels, LDAP/local kind, optional login/password)
//! - An in-memory [`AccountStore`] with add/remove/update operations
//! - A snapshot/restore pair with a stable JSON wire shape
//! - A file-backed persistence mirror that re-saves the snapshot on change
//!
//! The store is an explicitly constructed value, not a process-wide singleton:
//! the application owns it, hands it to whatever consumes it, and wires
//! persistence at the composition layer.
//!
//! ```
//! use credledger::{Account, AccountId, AccountKind, AccountStore};
//!
//! let mut store = AccountStore::new();
//! store.add_account(Account::new("ops-1", AccountKind::Ldap).with_login("ops"))?;
//! assert_eq!(store.get(&AccountId::new("ops-1")).map(|a| a.kind), Some(AccountKind::Ldap));
//! # Ok::<(), credledger::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod persist;

pub use account::{
    Account, AccountId, AccountKind, AccountStore, ChangeHook, Label, Password, StoreSnapshot,
};
pub use error::{Error, Result};
pub use persist::{SnapshotFile, open_persisted};
