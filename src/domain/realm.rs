//! Realm domain model
//!
//! Realm references, the stored realm record, and the exported realm
//! representations (realm snapshot and user page payload).

use super::ids::{RealmId, RealmName};
use super::user::UserRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of a realm as listed by the store
///
/// Immutable once listed; passed by value to the export driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RealmRef {
    pub id: RealmId,
    pub name: RealmName,
}

impl RealmRef {
    pub fn new(id: RealmId, name: RealmName) -> Self {
        Self { id, name }
    }
}

/// A realm as held by a backing store, including its users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRecord {
    pub id: RealmId,

    #[serde(rename = "realm")]
    pub name: RealmName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl RealmRecord {
    /// Creates an empty, enabled realm
    pub fn new(id: RealmId, name: RealmName) -> Self {
        Self {
            id,
            name,
            display_name: None,
            enabled: true,
            attributes: BTreeMap::new(),
            users: Vec::new(),
        }
    }

    /// Returns the reference identifying this realm
    pub fn to_ref(&self) -> RealmRef {
        RealmRef::new(self.id.clone(), self.name.clone())
    }

    /// Users in export order
    pub fn sorted_users(&self) -> Vec<&UserRecord> {
        let mut users: Vec<&UserRecord> = self.users.iter().collect();
        users.sort_by(|a, b| a.export_order(b));
        users
    }

    /// Put `users` into export order in place
    pub fn sort_users(&mut self) {
        self.users.sort_by(|a, b| a.export_order(b));
    }

    /// Whether `users` is already in export order
    pub fn users_in_export_order(&self) -> bool {
        self.users
            .windows(2)
            .all(|pair| pair[0].export_order(&pair[1]).is_le())
    }

    /// Insert `user` at its export position
    ///
    /// Keeps an already sorted user list sorted.
    pub fn insert_user(&mut self, user: UserRecord) {
        let at = self
            .users
            .partition_point(|u| u.export_order(&user).is_le());
        self.users.insert(at, user);
    }
}

fn default_enabled() -> bool {
    true
}

/// Full exported representation of one realm
///
/// `users` is present only when users are exported into the same artifact
/// as the realm metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmSnapshot {
    pub id: RealmId,

    pub realm: RealmName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub enabled: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserRecord>>,
}

impl RealmSnapshot {
    /// Builds the representation of `record`, embedding users in export order if requested
    pub fn from_record(record: &RealmRecord, include_users: bool) -> Self {
        let users = include_users.then(|| record.sorted_users().into_iter().cloned().collect());

        Self {
            id: record.id.clone(),
            realm: record.name.clone(),
            display_name: record.display_name.clone(),
            enabled: record.enabled,
            attributes: record.attributes.clone(),
            users,
        }
    }

    /// Number of embedded users
    pub fn embedded_user_count(&self) -> usize {
        self.users.as_ref().map_or(0, Vec::len)
    }
}

/// Payload of one user page artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersArtifact {
    pub realm: RealmName,
    pub users: Vec<UserRecord>,
}
