//! In-memory dataset shared by the bundled store adapters
//!
//! A [`Dataset`] is the full content of a store: an ordered list of realms
//! with their users. [`DatasetSession`] answers [`StoreSession`] queries
//! against one borrowed dataset, which is how both the memory store and the
//! file store present a transaction's consistent view.

use super::traits::StoreSession;
use crate::domain::realm::{RealmRecord, RealmRef, RealmSnapshot};
use crate::domain::user::UserRecord;
use crate::domain::{KeyportError, RealmName, Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Full content of a realm store
///
/// Stores keep each realm's users in export order, so pages are plain
/// slices of `users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub realms: Vec<RealmRecord>,
}

impl Dataset {
    pub fn new(realms: Vec<RealmRecord>) -> Self {
        let mut dataset = Self { realms };
        dataset.sort_users();
        dataset
    }

    /// Put every realm's users into export order
    pub fn sort_users(&mut self) {
        for realm in &mut self.realms {
            if !realm.users_in_export_order() {
                realm.sort_users();
            }
        }
    }

    /// Checks that realm ids and names are unique
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupted` naming the first duplicate found.
    pub fn validate(&self) -> std::result::Result<(), StoreError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for realm in &self.realms {
            if !ids.insert(realm.id.as_str()) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate realm id '{}'",
                    realm.id
                )));
            }
            if !names.insert(realm.name.as_str()) {
                return Err(StoreError::Corrupted(format!(
                    "duplicate realm name '{}'",
                    realm.name
                )));
            }
        }
        Ok(())
    }

    pub fn realm_by_name(&self, name: &str) -> Option<&RealmRecord> {
        self.realms.iter().find(|r| r.name.as_str() == name)
    }

    pub fn realm_by_name_mut(&mut self, name: &str) -> Option<&mut RealmRecord> {
        self.realms.iter_mut().find(|r| r.name.as_str() == name)
    }

    /// Total number of users across all realms
    pub fn user_count(&self) -> usize {
        self.realms.iter().map(|r| r.users.len()).sum()
    }
}

/// Read-only session over a borrowed dataset
pub struct DatasetSession<'a> {
    dataset: &'a Dataset,
}

impl<'a> DatasetSession<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    // Realms are re-resolved by id so that a realm renamed or deleted since
    // the reference was taken is reported as missing.
    fn resolve(&self, realm: &RealmRef) -> Result<&'a RealmRecord> {
        self.dataset
            .realms
            .iter()
            .find(|r| r.id == realm.id)
            .ok_or_else(|| KeyportError::RealmNotFound(realm.name.to_string()))
    }
}

impl StoreSession for DatasetSession<'_> {
    fn list_realms(&self) -> Result<Vec<RealmRef>> {
        Ok(self.dataset.realms.iter().map(RealmRecord::to_ref).collect())
    }

    fn lookup_realm_by_name(&self, name: &RealmName) -> Result<RealmRef> {
        self.dataset
            .realm_by_name(name.as_str())
            .map(RealmRecord::to_ref)
            .ok_or_else(|| KeyportError::RealmNotFound(name.to_string()))
    }

    fn count_users(&self, realm: &RealmRef) -> Result<usize> {
        Ok(self.resolve(realm)?.users.len())
    }

    fn read_user_slice(
        &self,
        realm: &RealmRef,
        start: usize,
        end: usize,
    ) -> Result<Vec<UserRecord>> {
        let record = self.resolve(realm)?;
        let end = end.min(record.users.len());
        if start >= end {
            return Ok(Vec::new());
        }
        if record.users_in_export_order() {
            return Ok(record.users[start..end].to_vec());
        }

        // Only reachable when `realms` was edited directly
        Ok(record.sorted_users()[start..end]
            .iter()
            .map(|u| (*u).clone())
            .collect())
    }

    fn build_realm_representation(
        &self,
        realm: &RealmRef,
        include_users: bool,
    ) -> Result<RealmSnapshot> {
        let record = self.resolve(realm)?;
        Ok(RealmSnapshot::from_record(record, include_users))
    }
}
