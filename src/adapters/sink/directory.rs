//! Directory artifact writer
//!
//! Writes each artifact as `<output_dir>/<artifact>.json`. Files are first
//! written under a temporary name and then renamed, so a crash never leaves
//! a truncated artifact behind under its final name.

use super::traits::{
    encode_payload, ArtifactKind, ArtifactReceipt, RealmWriter, UserPageWriter,
};
use crate::domain::realm::{RealmRef, RealmSnapshot, UsersArtifact};
use crate::domain::user::UserRecord;
use crate::domain::{ArtifactName, Result, SinkError};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts as JSON files into one directory
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    output_dir: PathBuf,
    pretty: bool,
    dry_run: bool,
}

impl DirectoryWriter {
    /// Create a writer for `output_dir`, creating the directory if needed
    ///
    /// In dry-run mode artifacts are encoded and checksummed but nothing is
    /// written and the directory is not created.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::OutputUnavailable` if the directory cannot be created.
    pub fn new(output_dir: impl AsRef<Path>, pretty: bool, dry_run: bool) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();

        if !dry_run {
            fs::create_dir_all(&output_dir).map_err(|e| SinkError::OutputUnavailable {
                path: output_dir.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(Self {
            output_dir,
            pretty,
            dry_run,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// File name used for an artifact
    pub fn file_name(name: &ArtifactName) -> String {
        format!("{}.json", name.as_str())
    }

    fn persist(&self, name: &ArtifactName, payload: &[u8]) -> Result<String> {
        let file_name = Self::file_name(name);

        if self.dry_run {
            tracing::debug!(
                artifact = %name,
                bytes = payload.len(),
                "Dry run - skipping artifact write"
            );
            return Ok(file_name);
        }

        let final_path = self.output_dir.join(&file_name);
        let temp_path = self.output_dir.join(format!(".{file_name}.tmp"));

        let write_failed = |e: std::io::Error| SinkError::WriteFailed {
            artifact: name.to_string(),
            message: e.to_string(),
        };
        if let Err(e) = fs::write(&temp_path, payload).and_then(|_| fs::rename(&temp_path, &final_path)) {
            // Best effort; the write error is the one worth reporting
            let _ = fs::remove_file(&temp_path);
            return Err(write_failed(e).into());
        }

        tracing::debug!(
            artifact = %name,
            path = %final_path.display(),
            bytes = payload.len(),
            "Artifact written"
        );
        Ok(file_name)
    }
}

impl RealmWriter for DirectoryWriter {
    fn write_realm(
        &self,
        name: &ArtifactName,
        snapshot: &RealmSnapshot,
    ) -> Result<ArtifactReceipt> {
        let payload = encode_payload(name, snapshot, self.pretty)?;
        let file = self.persist(name, &payload)?;

        Ok(ArtifactReceipt::for_payload(
            name.clone(),
            ArtifactKind::Realm,
            snapshot.realm.clone(),
            snapshot.embedded_user_count(),
            &payload,
        )
        .with_file(file))
    }
}

impl UserPageWriter for DirectoryWriter {
    fn write_users(
        &self,
        name: &ArtifactName,
        realm: &RealmRef,
        users: &[UserRecord],
    ) -> Result<ArtifactReceipt> {
        let artifact = UsersArtifact {
            realm: realm.name.clone(),
            users: users.to_vec(),
        };
        let payload = encode_payload(name, &artifact, self.pretty)?;
        let file = self.persist(name, &payload)?;

        Ok(ArtifactReceipt::for_payload(
            name.clone(),
            ArtifactKind::Users,
            realm.name.clone(),
            users.len(),
            &payload,
        )
        .with_file(file))
    }
}
