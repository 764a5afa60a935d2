//! Artifact writer capability traits
//!
//! The export driver hands every artifact to one of these capabilities and
//! never learns where it ends up.

use crate::core::verification::checksum::calculate_checksum_bytes;
use crate::domain::realm::{RealmRef, RealmSnapshot};
use crate::domain::user::UserRecord;
use crate::domain::{ArtifactName, RealmName, Result, SinkError};
use serde::{Deserialize, Serialize};

/// Kind of exported artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Realm metadata, possibly with embedded users
    Realm,
    /// One page of realm users
    Users,
}

/// Record of one artifact handed to a writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactReceipt {
    /// Deterministic artifact name
    pub name: ArtifactName,

    pub kind: ArtifactKind,

    /// Realm the artifact belongs to
    pub realm: RealmName,

    /// Number of users contained in the artifact
    pub users: usize,

    /// Size of the encoded payload in bytes
    pub bytes: usize,

    /// Hex-encoded SHA-256 of the encoded payload
    pub checksum: String,

    /// File the artifact was written to, relative to the output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ArtifactReceipt {
    /// Build a receipt for an encoded payload
    pub fn for_payload(
        name: ArtifactName,
        kind: ArtifactKind,
        realm: RealmName,
        users: usize,
        payload: &[u8],
    ) -> Self {
        Self {
            name,
            kind,
            realm,
            users,
            bytes: payload.len(),
            checksum: calculate_checksum_bytes(payload),
            file: None,
        }
    }

    /// Set the file the artifact was written to
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Capability to persist realm metadata artifacts
pub trait RealmWriter {
    /// Persist `snapshot` under `name`
    ///
    /// # Errors
    ///
    /// Returns `KeyportError::Write` if the artifact cannot be persisted.
    fn write_realm(&self, name: &ArtifactName, snapshot: &RealmSnapshot)
        -> Result<ArtifactReceipt>;
}

/// Capability to persist user page artifacts
pub trait UserPageWriter {
    /// Persist one page of `realm`'s users under `name`
    ///
    /// # Errors
    ///
    /// Returns `KeyportError::Write` if the artifact cannot be persisted.
    fn write_users(
        &self,
        name: &ArtifactName,
        realm: &RealmRef,
        users: &[UserRecord],
    ) -> Result<ArtifactReceipt>;
}

impl<W: RealmWriter + ?Sized> RealmWriter for &W {
    fn write_realm(
        &self,
        name: &ArtifactName,
        snapshot: &RealmSnapshot,
    ) -> Result<ArtifactReceipt> {
        (**self).write_realm(name, snapshot)
    }
}

impl<W: UserPageWriter + ?Sized> UserPageWriter for &W {
    fn write_users(
        &self,
        name: &ArtifactName,
        realm: &RealmRef,
        users: &[UserRecord],
    ) -> Result<ArtifactReceipt> {
        (**self).write_users(name, realm, users)
    }
}

/// Encode an artifact payload as JSON
///
/// # Errors
///
/// Returns `SinkError::EncodeFailed` if serialization fails.
pub fn encode_payload<T: Serialize>(
    name: &ArtifactName,
    payload: &T,
    pretty: bool,
) -> std::result::Result<Vec<u8>, SinkError> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(payload)
    } else {
        serde_json::to_vec(payload)
    };
    encoded.map_err(|e| SinkError::EncodeFailed {
        artifact: name.to_string(),
        message: e.to_string(),
    })
}
