//! In-memory realm store
//!
//! Holds a [`Dataset`] behind a read/write lock. A transaction holds the read
//! guard while its work runs, so every transaction observes one consistent
//! state and mutations interleave only between transactions.

use super::dataset::{Dataset, DatasetSession};
use super::traits::{StoreSession, TransactionalStore};
use crate::domain::realm::RealmRecord;
use crate::domain::user::UserRecord;
use crate::domain::{KeyportError, Result, StoreError, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Realm store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: RwLock<Dataset>,
    transactions: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `dataset`
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset has duplicate realm ids or names.
    pub fn from_dataset(mut dataset: Dataset) -> Result<Self> {
        dataset.validate()?;
        dataset.sort_users();
        Ok(Self {
            dataset: RwLock::new(dataset),
            transactions: AtomicUsize::new(0),
        })
    }

    /// Add a realm
    ///
    /// # Errors
    ///
    /// Returns a validation error if a realm with the same id or name exists.
    pub fn insert_realm(&self, mut realm: RealmRecord) -> Result<()> {
        let mut dataset = self.write()?;
        if dataset
            .realms
            .iter()
            .any(|r| r.id == realm.id || r.name == realm.name)
        {
            return Err(KeyportError::Validation(format!(
                "realm '{}' already exists",
                realm.name
            )));
        }
        realm.sort_users();
        dataset.realms.push(realm);
        Ok(())
    }

    /// Remove a realm by name, returning whether it existed
    pub fn remove_realm(&self, name: &str) -> Result<bool> {
        let mut dataset = self.write()?;
        let before = dataset.realms.len();
        dataset.realms.retain(|r| r.name.as_str() != name);
        Ok(dataset.realms.len() != before)
    }

    /// Add a user to a realm at its export position
    pub fn add_user(&self, realm: &str, user: UserRecord) -> Result<()> {
        let mut dataset = self.write()?;
        let record = dataset
            .realm_by_name_mut(realm)
            .ok_or_else(|| KeyportError::RealmNotFound(realm.to_string()))?;
        record.insert_user(user);
        Ok(())
    }

    /// Remove a user from a realm, returning whether it existed
    pub fn remove_user(&self, realm: &str, user_id: &UserId) -> Result<bool> {
        let mut dataset = self.write()?;
        let record = dataset
            .realm_by_name_mut(realm)
            .ok_or_else(|| KeyportError::RealmNotFound(realm.to_string()))?;
        let before = record.users.len();
        record.users.retain(|u| &u.id != user_id);
        Ok(record.users.len() != before)
    }

    /// Copy of the current content
    pub fn snapshot(&self) -> Result<Dataset> {
        Ok(self.read()?.clone())
    }

    /// Number of transactions run so far
    pub fn transaction_count(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }

    fn read(&self) -> std::result::Result<RwLockReadGuard<'_, Dataset>, StoreError> {
        self.dataset
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> std::result::Result<RwLockWriteGuard<'_, Dataset>, StoreError> {
        self.dataset
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl TransactionalStore for MemoryStore {
    fn run_in_transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn StoreSession) -> Result<T>,
    {
        let dataset = self.read()?;
        let txn = self.transactions.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(txn, "Memory store transaction started");

        let session = DatasetSession::new(&dataset);
        let result = work(&session);

        tracing::trace!(txn, ok = result.is_ok(), "Memory store transaction finished");
        result
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
