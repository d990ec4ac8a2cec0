//! Account management module.
//!
//! Provides the account record types, the in-memory store, and the snapshot
//! wire shape.

mod model;
mod snapshot;
mod store;

pub use model::{Account, AccountId, AccountKind, Label, Password};
pub use snapshot::StoreSnapshot;
pub use store::{AccountStore, ChangeHook};
