//! Export manifest
//!
//! A JSON audit record of one export run, written next to the artifacts as
//! `export-manifest.json`. It lists every artifact with its user count and
//! checksum so the output directory can be verified later.

use crate::adapters::sink::ArtifactReceipt;
use crate::core::export::{ExportFailureType, ExportSummary, UserPaging};
use crate::domain::{ExportStage, KeyportError, RealmName, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE_NAME: &str = "export-manifest.json";

/// Current manifest format version
pub const MANIFEST_VERSION: u32 = 1;

/// Per-realm entry of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRealm {
    pub realm: RealmName,
    pub total_users: usize,
    pub users_exported: usize,
    pub pages: usize,
}

/// A realm that did not finish, and where it stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFailure {
    pub realm: RealmName,
    pub error_type: ExportFailureType,
    pub stage: Option<ExportStage>,
    pub message: String,

    /// Users in the artifacts the realm wrote before failing
    pub users_exported: usize,
}

/// Audit record of an export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub version: u32,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub users_per_file: i64,
    pub dry_run: bool,

    /// False when a realm failed or the run stopped before the last realm
    pub complete: bool,

    pub realms: Vec<ManifestRealm>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ManifestFailure>,

    /// Every artifact written, in write order, including those of failed realms
    pub artifacts: Vec<ArtifactReceipt>,
}

impl ExportManifest {
    /// Build the manifest for a run, finished or aborted
    pub fn from_summary(summary: &ExportSummary, paging: UserPaging) -> Self {
        Self {
            version: MANIFEST_VERSION,
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            users_per_file: paging.users_per_file(),
            dry_run: summary.dry_run,
            complete: summary.is_complete(),
            realms: summary
                .realms
                .iter()
                .map(|r| ManifestRealm {
                    realm: r.realm.name.clone(),
                    total_users: r.total_users,
                    users_exported: r.users_exported,
                    pages: r.page_artifacts(),
                })
                .collect(),
            failures: summary
                .errors
                .iter()
                .map(|f| ManifestFailure {
                    realm: f.realm.clone(),
                    error_type: f.error_type,
                    stage: f.stage,
                    message: f.message.clone(),
                    users_exported: f.artifacts.iter().map(|a| a.users).sum(),
                })
                .collect(),
            artifacts: summary.artifacts().cloned().collect(),
        }
    }

    /// Path of the manifest inside `output_dir`
    pub fn path_in(output_dir: impl AsRef<Path>) -> PathBuf {
        output_dir.as_ref().join(MANIFEST_FILE_NAME)
    }

    /// Write the manifest into `output_dir`, returning the file path
    pub fn write_to(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = Self::path_in(output_dir);
        let json = serde_json::to_vec_pretty(self)?;
        fs::write(&path, json)?;

        tracing::info!(
            path = %path.display(),
            run_id = %self.run_id,
            complete = self.complete,
            artifacts = self.artifacts.len(),
            "Export manifest written"
        );
        Ok(path)
    }

    /// Load a manifest from `path`
    ///
    /// # Errors
    ///
    /// Returns `KeyportError::Verification` if the file is missing, is not
    /// a manifest, or has an unsupported version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyportError::Verification(format!(
                "Failed to read manifest {}: {}",
                path.display(),
                e
            ))
        })?;

        let manifest: Self = serde_json::from_str(&content).map_err(|e| {
            KeyportError::Verification(format!(
                "Failed to parse manifest {}: {}",
                path.display(),
                e
            ))
        })?;

        if manifest.version != MANIFEST_VERSION {
            return Err(KeyportError::Verification(format!(
                "Unsupported manifest version {} (expected {})",
                manifest.version, MANIFEST_VERSION
            )));
        }

        Ok(manifest)
    }

    /// Users written by the run, partial realms included
    pub fn total_users(&self) -> usize {
        self.realms.iter().map(|r| r.users_exported).sum::<usize>()
            + self.failures.iter().map(|f| f.users_exported).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::MemoryWriter;
    use crate::adapters::store::MemoryStore;
    use crate::core::export::ExportCoordinator;
    use crate::domain::{RealmId, RealmRecord, UserRecord};
    use tempfile::TempDir;

    fn exported_summary() -> ExportSummary {
        let store = MemoryStore::new();
        store
            .insert_realm(RealmRecord::new(
                RealmId::new("r-1").unwrap(),
                RealmName::new("acme").unwrap(),
            ))
            .unwrap();
        for i in 0..3 {
            store
                .add_user(
                    "acme",
                    UserRecord::builder()
                        .id(format!("u-{i}"))
                        .username(format!("user{i}"))
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        let writer = MemoryWriter::new();
        ExportCoordinator::new(&store, &writer, UserPaging::from_users_per_file(2))
            .export_all()
            .unwrap()
    }

    #[test]
    fn test_manifest_from_summary() {
        let summary = exported_summary();
        let manifest = ExportManifest::from_summary(&summary, UserPaging::from_users_per_file(2));

        assert_eq!(manifest.version, MANIFEST_VERSION);
        assert!(manifest.complete);
        assert!(manifest.failures.is_empty());
        assert_eq!(manifest.users_per_file, 2);
        assert_eq!(manifest.artifacts.len(), 3);
        assert_eq!(manifest.realms.len(), 1);
        assert_eq!(manifest.realms[0].pages, 2);
        assert_eq!(manifest.total_users(), 3);
    }

    #[test]
    fn test_manifest_write_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let manifest =
            ExportManifest::from_summary(&exported_summary(), UserPaging::from_users_per_file(2));

        let path = manifest.write_to(temp_dir.path()).unwrap();
        assert!(path.ends_with(MANIFEST_FILE_NAME));

        let loaded = ExportManifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_manifest_of_aborted_run_is_incomplete() {
        let store = MemoryStore::new();
        for (i, (name, users)) in [("master", 0), ("acme", 5)].into_iter().enumerate() {
            store
                .insert_realm(RealmRecord::new(
                    RealmId::new(format!("r-{i}")).unwrap(),
                    RealmName::new(name).unwrap(),
                ))
                .unwrap();
            for u in 0..users {
                store
                    .add_user(
                        name,
                        UserRecord::builder()
                            .id(format!("u-{u}"))
                            .username(format!("user{u}"))
                            .build()
                            .unwrap(),
                    )
                    .unwrap();
            }
        }
        let writer = MemoryWriter::failing_on("acme-users-1");
        let paging = UserPaging::from_users_per_file(2);
        let aborted = ExportCoordinator::new(&store, &writer, paging)
            .run_all()
            .unwrap_err();

        let temp_dir = TempDir::new().unwrap();
        let path = ExportManifest::from_summary(&aborted.summary, paging)
            .write_to(temp_dir.path())
            .unwrap();
        let manifest = ExportManifest::load(&path).unwrap();

        assert!(!manifest.complete);
        let names: Vec<&str> = manifest.artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["master-realm", "acme-realm", "acme-users-0"]);
        assert_eq!(manifest.failures.len(), 1);
        assert_eq!(manifest.failures[0].realm.as_str(), "acme");
        assert_eq!(manifest.failures[0].error_type, ExportFailureType::Write);
        assert_eq!(
            manifest.failures[0].stage,
            Some(ExportStage::Page {
                index: 1,
                start: 2,
                end: 4
            })
        );
        assert_eq!(manifest.total_users(), 2);
    }

    #[test]
    fn test_load_missing_manifest_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = ExportManifest::load(temp_dir.path().join(MANIFEST_FILE_NAME)).unwrap_err();
        assert!(matches!(err, KeyportError::Verification(_)));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_dir = TempDir::new().unwrap();
        let mut manifest =
            ExportManifest::from_summary(&exported_summary(), UserPaging::default());
        manifest.version = 99;
        let path = manifest.write_to(temp_dir.path()).unwrap();

        let err = ExportManifest::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported manifest version"));
    }
}
