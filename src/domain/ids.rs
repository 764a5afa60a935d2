//! Domain identifier types with validation
//!
//! Newtype wrappers for realm, user and artifact identifiers. Each type
//! keeps identifiers from being mixed up and validates its format on
//! construction and deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Realm identifier newtype wrapper
///
/// Opaque store-assigned identifier of a realm.
///
/// # Examples
///
/// ```
/// use keyport::domain::ids::RealmId;
/// use std::str::FromStr;
///
/// let realm_id = RealmId::from_str("3f1c7a2e-0b1d-4c55-9d8e-1a2b3c4d5e6f").unwrap();
/// assert_eq!(realm_id.as_str(), "3f1c7a2e-0b1d-4c55-9d8e-1a2b3c4d5e6f");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RealmId(String);

impl RealmId {
    /// Creates a new RealmId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(RealmId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Realm ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the realm ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RealmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RealmId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RealmId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RealmId> for String {
    fn from(id: RealmId) -> Self {
        id.0
    }
}

impl AsRef<str> for RealmId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Realm name newtype wrapper
///
/// Realm names are unique within a store and are used to derive artifact
/// names, so they may not contain path separators or `..`.
///
/// # Examples
///
/// ```
/// use keyport::domain::ids::RealmName;
///
/// let name = RealmName::new("acme").unwrap();
/// assert_eq!(name.as_str(), "acme");
/// assert!(RealmName::new("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RealmName(String);

impl RealmName {
    /// Creates a new RealmName from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(RealmName)` if the name is valid, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Realm name cannot be empty".to_string());
        }
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(format!(
                "Invalid realm name '{name}': must not contain path separators or '..'"
            ));
        }
        Ok(Self(name))
    }

    /// Returns the realm name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RealmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RealmName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RealmName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RealmName> for String {
    fn from(name: RealmName) -> Self {
        name.0
    }
}

impl AsRef<str> for RealmName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User identifier newtype wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Name of one exported artifact, without any medium-specific extension
///
/// Artifact names are derived deterministically from the realm name:
/// `<realm>-realm` for realm metadata and `<realm>-users-<page>` for user pages.
///
/// # Examples
///
/// ```
/// use keyport::domain::ids::{ArtifactName, RealmName};
///
/// let realm = RealmName::new("acme").unwrap();
/// assert_eq!(ArtifactName::realm(&realm).as_str(), "acme-realm");
/// assert_eq!(ArtifactName::users(&realm, 2).as_str(), "acme-users-2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Name of the realm metadata artifact
    pub fn realm(realm: &RealmName) -> Self {
        Self(format!("{}-realm", realm.as_str()))
    }

    /// Name of the user page artifact with the given page index
    pub fn users(realm: &RealmName, page_index: usize) -> Self {
        Self(format!("{}-users-{}", realm.as_str(), page_index))
    }

    pub(crate) fn from_raw(name: String) -> Self {
        Self(name)
    }

    /// Returns the artifact name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_id_creation() {
        let id = RealmId::new("3f1c7a2e-0b1d-4c55-9d8e-1a2b3c4d5e6f").unwrap();
        assert_eq!(id.as_str(), "3f1c7a2e-0b1d-4c55-9d8e-1a2b3c4d5e6f");
    }

    #[test]
    fn test_realm_id_empty_fails() {
        assert!(RealmId::new("").is_err());
        assert!(RealmId::new("   ").is_err());
    }

    #[test]
    fn test_realm_name_rejects_path_components() {
        assert!(RealmName::new("acme").is_ok());
        assert!(RealmName::new("acme/users").is_err());
        assert!(RealmName::new("acme\\users").is_err());
        assert!(RealmName::new("..").is_err());
        assert!(RealmName::new("").is_err());
    }

    #[test]
    fn test_realm_name_display() {
        let name = RealmName::new("master").unwrap();
        assert_eq!(format!("{}", name), "master");
    }

    #[test]
    fn test_realm_name_deserialization_validates() {
        let ok: RealmName = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(ok.as_str(), "acme");

        let bad = serde_json::from_str::<RealmName>("\"a/b\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_user_id_from_str() {
        let id: UserId = "u-1".parse().unwrap();
        assert_eq!(id.as_str(), "u-1");
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn test_artifact_names() {
        let realm = RealmName::new("acme").unwrap();
        assert_eq!(ArtifactName::realm(&realm).as_str(), "acme-realm");
        assert_eq!(ArtifactName::users(&realm, 0).as_str(), "acme-users-0");
        assert_eq!(ArtifactName::users(&realm, 12).to_string(), "acme-users-12");
    }

    #[test]
    fn test_realm_id_serialization() {
        let id = RealmId::new("realm-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"realm-1\"");
        let deserialized: RealmId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
