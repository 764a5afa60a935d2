//! User domain model
//!
//! This module defines the exported representation of a realm user.

use super::ids::UserId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A user of a realm, as stored and as exported
///
/// # Examples
///
/// ```
/// use keyport::domain::user::UserRecord;
///
/// let user = UserRecord::builder()
///     .id("u-1")
///     .username("alice")
///     .email("alice@example.com")
///     .build()
///     .unwrap();
/// assert_eq!(user.username, "alice");
/// assert!(user.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique identifier of the user within the store
    pub id: UserId,

    /// Login name, unique within the realm
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub email_verified: bool,

    /// Creation time in milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<i64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub realm_roles: Vec<String>,
}

impl UserRecord {
    /// Returns a builder for constructing a user
    pub fn builder() -> UserRecordBuilder {
        UserRecordBuilder::default()
    }

    /// Export ordering of users within a realm: by username, then by id
    pub fn export_order(&self, other: &Self) -> Ordering {
        self.username
            .cmp(&other.username)
            .then_with(|| self.id.cmp(&other.id))
    }
}

fn default_enabled() -> bool {
    true
}

/// Builder for constructing UserRecord instances
#[derive(Debug, Default)]
pub struct UserRecordBuilder {
    id: Option<String>,
    username: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    enabled: Option<bool>,
    email_verified: bool,
    created_timestamp: Option<i64>,
    attributes: BTreeMap<String, Vec<String>>,
    realm_roles: Vec<String>,
}

impl UserRecordBuilder {
    /// Sets the user ID
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = email_verified;
        self
    }

    pub fn created_timestamp(mut self, millis: i64) -> Self {
        self.created_timestamp = Some(millis);
        self
    }

    /// Adds a value to a multi-valued attribute
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn realm_role(mut self, role: impl Into<String>) -> Self {
        self.realm_roles.push(role.into());
        self
    }

    /// Builds the user
    ///
    /// # Errors
    ///
    /// Returns an error if the id or username is missing or invalid
    pub fn build(self) -> Result<UserRecord, String> {
        let id = UserId::new(self.id.ok_or("id is required")?)?;
        let username = self.username.ok_or("username is required")?;
        if username.trim().is_empty() {
            return Err("username cannot be empty".to_string());
        }

        Ok(UserRecord {
            id,
            username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            enabled: self.enabled.unwrap_or(true),
            email_verified: self.email_verified,
            created_timestamp: self.created_timestamp,
            attributes: self.attributes,
            realm_roles: self.realm_roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, username: &str) -> UserRecord {
        UserRecord::builder()
            .id(id)
            .username(username)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_username() {
        let result = UserRecord::builder().id("u-1").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_collects_attributes() {
        let user = UserRecord::builder()
            .id("u-1")
            .username("alice")
            .attribute("department", "sales")
            .attribute("department", "support")
            .realm_role("offline_access")
            .build()
            .unwrap();

        assert_eq!(
            user.attributes.get("department"),
            Some(&vec!["sales".to_string(), "support".to_string()])
        );
        assert_eq!(user.realm_roles, vec!["offline_access".to_string()]);
    }

    #[test]
    fn test_export_order_by_username_then_id() {
        let a = user("2", "alice");
        let b = user("1", "bob");
        let a2 = user("3", "alice");

        assert_eq!(a.export_order(&b), Ordering::Less);
        assert_eq!(a.export_order(&a2), Ordering::Less);
        assert_eq!(b.export_order(&a), Ordering::Greater);
    }

    #[test]
    fn test_serializes_camel_case_and_skips_empty() {
        let user = UserRecord::builder()
            .id("u-1")
            .username("alice")
            .first_name("Alice")
            .email_verified(true)
            .build()
            .unwrap();

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Alice");
        assert_eq!(json["emailVerified"], true);
        assert!(json.get("email").is_none());
        assert!(json.get("attributes").is_none());
    }

    #[test]
    fn test_deserialize_defaults_enabled() {
        let user: UserRecord =
            serde_json::from_str(r#"{"id": "u-9", "username": "zed"}"#).unwrap();
        assert!(user.enabled);
        assert!(!user.email_verified);
    }
}
