//! In-memory account store.

use tracing::debug;

use super::model::{Account, AccountId};
use super::snapshot::StoreSnapshot;
use crate::error::Error;
use crate::Result;

/// Observer invoked with the full account list after every state-changing
/// mutation.
pub type ChangeHook = Box<dyn FnMut(&[Account]) + Send>;

/// Container owning the canonical list of accounts.
///
/// The store is constructed explicitly by the application and injected into
/// whatever consumes it; there is no global instance. Mutations take `&mut
/// self`, so the single-writer model is enforced by the borrow checker rather
/// than by locking.
///
/// The store knows nothing about serialization targets: it exposes
/// [`snapshot`](Self::snapshot)/[`restore`](Self::restore) and an on-change
/// hook, and the owner wires persistence at the composition layer (see
/// [`crate::persist`]).
pub struct AccountStore {
    accounts: Vec<Account>,
    change_hook: Option<ChangeHook>,
}

impl AccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            change_hook: None,
        }
    }

    /// Create a store repopulated wholesale from a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            accounts: snapshot.accounts,
            change_hook: None,
        }
    }

    /// All accounts, in insertion order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Get an account by id.
    #[must_use]
    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| &account.id == id)
    }

    /// Number of accounts in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Append an account to the end of the list.
    ///
    /// Field shapes are not validated; ids are caller-supplied and opaque.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAccountId`] if an account with the same id is
    /// already in the store; the list is left unchanged.
    pub fn add_account(&mut self, account: Account) -> Result<()> {
        if self.get(&account.id).is_some() {
            return Err(Error::DuplicateAccountId(account.id));
        }
        debug!("Adding account {}", account.id);
        self.accounts.push(account);
        self.notify();
        Ok(())
    }

    /// Remove every account with the given id, preserving the relative order
    /// of the rest.
    ///
    /// Returns `true` if anything was removed. An unmatched id is a no-op:
    /// the list is untouched, the change hook does not fire, and `false` is
    /// returned.
    pub fn remove_account(&mut self, id: &AccountId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|account| &account.id != id);
        if self.accounts.len() == before {
            debug!("Remove of account {id} was a no-op");
            return false;
        }
        debug!("Removed account {id}");
        self.notify();
        true
    }

    /// Replace the first account whose id matches `updated.id`, preserving
    /// its position in the list. Never inserts.
    ///
    /// Returns `true` if a replacement happened. An unmatched id is a no-op:
    /// the list is untouched, the change hook does not fire, and `false` is
    /// returned.
    pub fn update_account(&mut self, updated: Account) -> bool {
        let Some(slot) = self
            .accounts
            .iter_mut()
            .find(|account| account.id == updated.id)
        else {
            debug!("Update of account {} was a no-op", updated.id);
            return false;
        };
        debug!("Updating account {}", updated.id);
        *slot = updated;
        self.notify();
        true
    }

    /// Take a snapshot of the full store state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(self.accounts.clone())
    }

    /// Serialize the full store state to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        self.snapshot().to_bytes()
    }

    /// Replace the full store state from a snapshot.
    ///
    /// Restore seeds state rather than mutating it, so the change hook does
    /// not fire.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        debug!("Restoring store from snapshot ({} accounts)", snapshot.accounts.len());
        self.accounts = snapshot.accounts;
    }

    /// Register the on-change observer, replacing any previous one.
    ///
    /// The hook runs synchronously after each state-changing mutation with
    /// the full account list. No-op removes/updates and [`restore`](Self::restore)
    /// do not fire it.
    pub fn set_change_hook(&mut self, hook: ChangeHook) {
        self.change_hook = Some(hook);
    }

    fn notify(&mut self) {
        // Take the hook out so it can borrow the list while running.
        if let Some(mut hook) = self.change_hook.take() {
            hook(&self.accounts);
            self.change_hook = Some(hook);
        }
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStore")
            .field("accounts", &self.accounts)
            .field("change_hook", &self.change_hook.as_ref().map(|_| "..."))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::account::{AccountKind, Label};

    fn account(id: &str) -> Account {
        Account::new(id, AccountKind::Local)
            .with_login(id.to_string() + "-login")
            .with_password("x")
    }

    fn ids(store: &AccountStore) -> Vec<&str> {
        store.accounts().iter().map(|a| a.id.as_str()).collect()
    }

    mod add_tests {
        use super::*;

        #[test]
        fn appends_in_insertion_order() {
            let mut store = AccountStore::new();
            for id in ["1", "2", "3"] {
                store.add_account(account(id)).unwrap();
            }
            assert_eq!(store.len(), 3);
            assert_eq!(ids(&store), ["1", "2", "3"]);
        }

        #[test]
        fn rejects_duplicate_id() {
            let mut store = AccountStore::new();
            store.add_account(account("1")).unwrap();
            let err = store.add_account(account("1")).unwrap_err();
            assert!(matches!(err, Error::DuplicateAccountId(id) if id.as_str() == "1"));
            assert_eq!(store.len(), 1);
        }
    }

    mod remove_tests {
        use super::*;

        #[test]
        fn removes_only_the_matching_account() {
            let mut store = AccountStore::new();
            for id in ["1", "2", "3"] {
                store.add_account(account(id)).unwrap();
            }
            assert!(store.remove_account(&AccountId::new("2")));
            assert_eq!(ids(&store), ["1", "3"]);
        }

        #[test]
        fn unmatched_id_is_a_noop() {
            let mut store = AccountStore::new();
            store.add_account(account("1")).unwrap();
            let before = store.accounts().to_vec();
            assert!(!store.remove_account(&AccountId::new("missing")));
            assert_eq!(store.accounts(), before);
        }
    }

    mod update_tests {
        use super::*;

        #[test]
        fn replaces_in_place() {
            let mut store = AccountStore::new();
            for id in ["1", "2", "3"] {
                store.add_account(account(id)).unwrap();
            }
            let updated = account("2")
                .with_login("bob2")
                .with_labels([Label::new("rotated")]);
            assert!(store.update_account(updated));

            assert_eq!(ids(&store), ["1", "2", "3"]);
            let two = store.get(&AccountId::new("2")).unwrap();
            assert_eq!(two.login.as_deref(), Some("bob2"));
            assert_eq!(two.labels, [Label::new("rotated")]);
            // Neighbors untouched
            assert_eq!(
                store.get(&AccountId::new("1")).unwrap().login.as_deref(),
                Some("1-login")
            );
        }

        #[test]
        fn unmatched_id_leaves_list_unchanged() {
            let mut store = AccountStore::new();
            store.add_account(account("1")).unwrap();
            let before = store.accounts().to_vec();
            assert!(!store.update_account(account("missing")));
            assert_eq!(store.accounts(), before);
        }

        #[test]
        fn never_inserts() {
            let mut store = AccountStore::new();
            store.update_account(account("ghost"));
            assert!(store.is_empty());
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn serialize_restore_round_trip() {
            let mut store = AccountStore::new();
            for id in ["1", "2", "3"] {
                store.add_account(account(id)).unwrap();
            }
            let bytes = store.serialize().unwrap();

            let mut restored = AccountStore::new();
            restored.restore(StoreSnapshot::from_bytes(&bytes).unwrap());
            assert_eq!(restored.accounts(), store.accounts());
        }

        #[test]
        fn from_snapshot_seeds_the_list() {
            let snapshot = StoreSnapshot::new(vec![account("a"), account("b")]);
            let store = AccountStore::from_snapshot(snapshot);
            assert_eq!(ids(&store), ["a", "b"]);
        }
    }

    mod change_hook_tests {
        use super::*;

        fn counting_store() -> (AccountStore, Arc<AtomicUsize>) {
            let mut store = AccountStore::new();
            let calls = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&calls);
            store.set_change_hook(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
            (store, calls)
        }

        #[test]
        fn fires_once_per_mutation() {
            let (mut store, calls) = counting_store();
            store.add_account(account("1")).unwrap();
            store.update_account(account("1").with_login("bob2"));
            store.remove_account(&AccountId::new("1"));
            assert_eq!(calls.load(Ordering::SeqCst), 3);
        }

        #[test]
        fn does_not_fire_on_noops_or_restore() {
            let (mut store, calls) = counting_store();
            store.remove_account(&AccountId::new("missing"));
            store.update_account(account("missing"));
            store.restore(StoreSnapshot::default());
            let _ = store.add_account(account("1"));
            let _ = store.add_account(account("1")); // duplicate, rejected
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn sees_the_list_after_the_mutation() {
            let mut store = AccountStore::new();
            let seen = Arc::new(AtomicUsize::new(usize::MAX));
            let observer = Arc::clone(&seen);
            store.set_change_hook(Box::new(move |accounts| {
                observer.store(accounts.len(), Ordering::SeqCst);
            }));
            store.add_account(account("1")).unwrap();
            assert_eq!(seen.load(Ordering::SeqCst), 1);
            store.remove_account(&AccountId::new("1"));
            assert_eq!(seen.load(Ordering::SeqCst), 0);
        }
    }

    proptest! {
        #[test]
        fn distinct_adds_keep_length_and_order(ids in proptest::collection::hash_set("[a-z0-9]{1,8}", 0..16)) {
            let ids: Vec<String> = ids.into_iter().collect();
            let mut store = AccountStore::new();
            for id in &ids {
                store.add_account(account(id)).unwrap();
            }
            prop_assert_eq!(store.len(), ids.len());
            let stored: Vec<&str> = store.accounts().iter().map(|a| a.id.as_str()).collect();
            let expected: Vec<&str> = ids.iter().map(String::as_str).collect();
            prop_assert_eq!(stored, expected);
        }

        #[test]
        fn remove_preserves_relative_order(ids in proptest::collection::hash_set("[a-z0-9]{1,8}", 1..16), pick in any::<prop::sample::Index>()) {
            let ids: Vec<String> = ids.into_iter().collect();
            let victim = ids[pick.index(ids.len())].clone();
            let mut store = AccountStore::new();
            for id in &ids {
                store.add_account(account(id)).unwrap();
            }
            prop_assert!(store.remove_account(&AccountId::new(victim.clone())));
            let stored: Vec<&str> = store.accounts().iter().map(|a| a.id.as_str()).collect();
            let expected: Vec<&str> = ids
                .iter()
                .filter(|id| **id != victim)
                .map(String::as_str)
                .collect();
            prop_assert_eq!(stored, expected);
        }
    }
}
