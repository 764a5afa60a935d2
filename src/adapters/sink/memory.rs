//! In-memory artifact writer
//!
//! Keeps every artifact it receives, in write order. Used as a test double
//! and by callers that post-process artifacts themselves.

use super::traits::{
    encode_payload, ArtifactKind, ArtifactReceipt, RealmWriter, UserPageWriter,
};
use crate::domain::realm::{RealmRef, RealmSnapshot, UsersArtifact};
use crate::domain::user::UserRecord;
use crate::domain::{ArtifactName, Result, SinkError};
use std::sync::{Mutex, MutexGuard};

/// Artifact held by a [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryArtifact {
    Realm(RealmSnapshot),
    Users(UsersArtifact),
}

/// One written artifact with its receipt
#[derive(Debug, Clone, PartialEq)]
pub struct StoredArtifact {
    pub receipt: ArtifactReceipt,
    pub payload: MemoryArtifact,
}

/// Collects artifacts in memory
#[derive(Debug, Default)]
pub struct MemoryWriter {
    artifacts: Mutex<Vec<StoredArtifact>>,
    fail_on: Option<ArtifactName>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that rejects the artifact called `name` with a write error
    pub fn failing_on(name: impl Into<String>) -> Self {
        Self {
            artifacts: Mutex::new(Vec::new()),
            fail_on: Some(ArtifactName::from_raw(name.into())),
        }
    }

    /// All artifacts written so far, in write order
    pub fn artifacts(&self) -> Vec<StoredArtifact> {
        self.lock().clone()
    }

    /// Names of all artifacts written so far, in write order
    pub fn names(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|a| a.receipt.name.to_string())
            .collect()
    }

    /// The realm snapshot written under `name`, if any
    pub fn realm_snapshot(&self, name: &str) -> Option<RealmSnapshot> {
        self.lock().iter().find_map(|a| match &a.payload {
            MemoryArtifact::Realm(snapshot) if a.receipt.name.as_str() == name => {
                Some(snapshot.clone())
            }
            _ => None,
        })
    }

    /// The user page written under `name`, if any
    pub fn users_page(&self, name: &str) -> Option<UsersArtifact> {
        self.lock().iter().find_map(|a| match &a.payload {
            MemoryArtifact::Users(page) if a.receipt.name.as_str() == name => Some(page.clone()),
            _ => None,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoredArtifact>> {
        // A poisoned lock only means a panicking test thread; the data is still usable.
        self.artifacts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_not_failing(&self, name: &ArtifactName) -> std::result::Result<(), SinkError> {
        match &self.fail_on {
            Some(failing) if failing == name => Err(SinkError::WriteFailed {
                artifact: name.to_string(),
                message: "rejected by memory writer".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl RealmWriter for MemoryWriter {
    fn write_realm(
        &self,
        name: &ArtifactName,
        snapshot: &RealmSnapshot,
    ) -> Result<ArtifactReceipt> {
        self.check_not_failing(name)?;
        let payload = encode_payload(name, snapshot, false)?;
        let receipt = ArtifactReceipt::for_payload(
            name.clone(),
            ArtifactKind::Realm,
            snapshot.realm.clone(),
            snapshot.embedded_user_count(),
            &payload,
        );

        self.lock().push(StoredArtifact {
            receipt: receipt.clone(),
            payload: MemoryArtifact::Realm(snapshot.clone()),
        });
        Ok(receipt)
    }
}

impl UserPageWriter for MemoryWriter {
    fn write_users(
        &self,
        name: &ArtifactName,
        realm: &RealmRef,
        users: &[UserRecord],
    ) -> Result<ArtifactReceipt> {
        self.check_not_failing(name)?;
        let artifact = UsersArtifact {
            realm: realm.name.clone(),
            users: users.to_vec(),
        };
        let payload = encode_payload(name, &artifact, false)?;
        let receipt = ArtifactReceipt::for_payload(
            name.clone(),
            ArtifactKind::Users,
            realm.name.clone(),
            users.len(),
            &payload,
        );

        self.lock().push(StoredArtifact {
            receipt: receipt.clone(),
            payload: MemoryArtifact::Users(artifact),
        });
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KeyportError, RealmId, RealmName, RealmRecord};

    fn acme() -> RealmRecord {
        RealmRecord::new(
            RealmId::new("r-1").unwrap(),
            RealmName::new("acme").unwrap(),
        )
    }

    #[test]
    fn test_records_artifacts_in_order() {
        let writer = MemoryWriter::new();
        let record = acme();

        writer
            .write_realm(
                &ArtifactName::realm(&record.name),
                &RealmSnapshot::from_record(&record, false),
            )
            .unwrap();
        writer
            .write_users(&ArtifactName::users(&record.name, 0), &record.to_ref(), &[])
            .unwrap();

        assert_eq!(writer.names(), vec!["acme-realm", "acme-users-0"]);
        assert!(writer.realm_snapshot("acme-realm").is_some());
        assert!(writer.users_page("acme-users-0").is_some());
        assert!(writer.users_page("acme-realm").is_none());
    }

    #[test]
    fn test_failing_on_rejects_named_artifact() {
        let writer = MemoryWriter::failing_on("acme-users-1");
        let record = acme();

        assert!(writer
            .write_users(&ArtifactName::users(&record.name, 0), &record.to_ref(), &[])
            .is_ok());
        let err = writer
            .write_users(&ArtifactName::users(&record.name, 1), &record.to_ref(), &[])
            .unwrap_err();

        assert!(matches!(err, KeyportError::Write(SinkError::WriteFailed { .. })));
        assert_eq!(writer.names(), vec!["acme-users-0"]);
    }
}
