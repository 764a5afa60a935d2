//! Backing store abstraction traits
//!
//! This module defines the narrow read interface the export pipeline
//! consumes from a transactional store.

use crate::domain::realm::{RealmRef, RealmSnapshot};
use crate::domain::user::UserRecord;
use crate::domain::{RealmName, Result};
use std::sync::Arc;

/// Read operations available inside one store transaction
///
/// Every method observes the state of the store as of the enclosing
/// transaction.
pub trait StoreSession {
    /// List all realms, in store order
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_realms(&self) -> Result<Vec<RealmRef>>;

    /// Resolve a realm by name
    ///
    /// # Errors
    ///
    /// Returns `KeyportError::RealmNotFound` if no realm has this name.
    fn lookup_realm_by_name(&self, name: &RealmName) -> Result<RealmRef>;

    /// Current number of users in `realm`
    fn count_users(&self, realm: &RealmRef) -> Result<usize>;

    /// Users `[start, end)` of `realm` in export order
    ///
    /// The returned slice is shorter than `end - start` (possibly empty) if
    /// the realm currently holds fewer than `end` users.
    fn read_user_slice(&self, realm: &RealmRef, start: usize, end: usize)
        -> Result<Vec<UserRecord>>;

    /// Build the exported representation of `realm`
    ///
    /// Users are embedded only when `include_users` is true.
    fn build_realm_representation(
        &self,
        realm: &RealmRef,
        include_users: bool,
    ) -> Result<RealmSnapshot>;
}

/// A store that executes work atomically against a consistent view
pub trait TransactionalStore {
    /// Execute `work` inside one read transaction
    ///
    /// The transaction is closed when `work` returns, whether it succeeded
    /// or not. Errors returned by `work` propagate unchanged.
    ///
    /// # Errors
    ///
    /// Returns `KeyportError::Store` if the transaction cannot be opened,
    /// or whatever error `work` returns.
    fn run_in_transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>;

    /// Human readable description of the store, for logs
    fn describe(&self) -> String;
}

impl<S: TransactionalStore + ?Sized> TransactionalStore for &S {
    fn run_in_transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        (**self).run_in_transaction(work)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: TransactionalStore + ?Sized> TransactionalStore for Arc<S> {
    fn run_in_transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        (**self).run_in_transaction(work)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
