//! Verification logic for post-export validation
//!
//! Re-reads every artifact listed in a manifest and compares its checksum
//! with the one recorded at write time.

use super::checksum::calculate_checksum_bytes;
use super::manifest::ExportManifest;
use super::report::{VerificationFailure, VerificationReport};
use crate::adapters::sink::ArtifactReceipt;
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Verifier for exported artifacts
pub struct Verifier {
    output_dir: PathBuf,
}

impl Verifier {
    /// Create a verifier for artifacts stored in `output_dir`
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Load the manifest at `manifest_path` and verify it
    ///
    /// Artifact paths are resolved relative to the manifest's directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keyport::core::verification::Verifier;
    ///
    /// let report = Verifier::verify_manifest_file("export/export-manifest.json")?;
    /// println!("{}", report.format_summary());
    /// # Ok::<(), keyport::domain::KeyportError>(())
    /// ```
    pub fn verify_manifest_file(manifest_path: impl AsRef<Path>) -> Result<VerificationReport> {
        let manifest_path = manifest_path.as_ref();
        let manifest = ExportManifest::load(manifest_path)?;
        let output_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self::new(output_dir).verify_export(&manifest))
    }

    /// Verify every artifact listed in `manifest`
    pub fn verify_export(&self, manifest: &ExportManifest) -> VerificationReport {
        let start = Instant::now();
        let mut report = VerificationReport::new();

        tracing::info!(
            run_id = %manifest.run_id,
            artifacts = manifest.artifacts.len(),
            output_dir = %self.output_dir.display(),
            "Starting post-export verification"
        );

        for artifact in &manifest.artifacts {
            match self.verify_artifact(artifact, manifest.dry_run) {
                Ok(true) => report.record_pass(artifact),
                Ok(false) => report.record_skip(),
                Err(failure) => {
                    tracing::warn!(
                        artifact = %failure.artifact,
                        reason = %failure.reason,
                        "Artifact failed verification"
                    );
                    report.record_failure(failure);
                }
            }
        }

        let report = report.finish(start.elapsed());

        tracing::info!(
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            users = report.users_verified,
            duration_ms = report.duration_ms,
            "Verification completed"
        );

        report
    }

    /// Returns `Ok(false)` for artifacts that were never persisted
    fn verify_artifact(
        &self,
        artifact: &ArtifactReceipt,
        dry_run: bool,
    ) -> std::result::Result<bool, VerificationFailure> {
        let Some(file) = artifact.file.as_deref().filter(|_| !dry_run) else {
            return Ok(false);
        };

        let failure = |actual: Option<String>, reason: String| {
            VerificationFailure::for_receipt(artifact, file, actual, reason)
        };

        let data = std::fs::read(self.output_dir.join(file))
            .map_err(|e| failure(None, format!("Failed to read artifact: {e}")))?;
        let actual = calculate_checksum_bytes(&data);

        if actual != artifact.checksum {
            return Err(failure(Some(actual), "Checksum mismatch".to_string()));
        }
        if data.len() != artifact.bytes {
            return Err(failure(
                Some(actual),
                format!("Size mismatch: expected {} bytes, found {}", artifact.bytes, data.len()),
            ));
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::DirectoryWriter;
    use crate::adapters::store::MemoryStore;
    use crate::core::export::{ExportCoordinator, UserPaging};
    use crate::domain::{RealmId, RealmName, RealmRecord, UserRecord};
    use tempfile::TempDir;

    fn export_to(dir: &Path, dry_run: bool) -> ExportManifest {
        let store = MemoryStore::new();
        store
            .insert_realm(RealmRecord::new(
                RealmId::new("r-1").unwrap(),
                RealmName::new("acme").unwrap(),
            ))
            .unwrap();
        store
            .add_user(
                "acme",
                UserRecord::builder().id("u-1").username("alice").build().unwrap(),
            )
            .unwrap();

        let writer = DirectoryWriter::new(dir, false, dry_run).unwrap();
        let paging = UserPaging::default();
        let summary = ExportCoordinator::new(&store, &writer, paging)
            .with_dry_run(dry_run)
            .export_all()
            .unwrap();
        ExportManifest::from_summary(&summary, paging)
    }

    #[test]
    fn test_verify_untouched_export_passes() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = export_to(temp_dir.path(), false);

        let report = Verifier::new(temp_dir.path()).verify_export(&manifest);

        assert_eq!(report.passed, 2);
        assert!(report.is_success());
    }

    #[test]
    fn test_verify_detects_tampered_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = export_to(temp_dir.path(), false);
        std::fs::write(temp_dir.path().join("acme-users-0.json"), b"[]").unwrap();

        let report = Verifier::new(temp_dir.path()).verify_export(&manifest);

        assert_eq!(report.failed, 1);
        assert_eq!(report.failures[0].artifact.as_str(), "acme-users-0");
        assert_eq!(report.failures[0].reason, "Checksum mismatch");
    }

    #[test]
    fn test_verify_detects_missing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = export_to(temp_dir.path(), false);
        std::fs::remove_file(temp_dir.path().join("acme-realm.json")).unwrap();

        let report = Verifier::new(temp_dir.path()).verify_export(&manifest);

        assert_eq!(report.failed, 1);
        assert!(report.failures[0].actual_checksum.is_none());
    }

    #[test]
    fn test_dry_run_artifacts_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = export_to(temp_dir.path(), true);

        let report = Verifier::new(temp_dir.path()).verify_export(&manifest);

        assert_eq!(report.skipped, 2);
        assert!(report.is_success());
    }

    #[test]
    fn test_verify_manifest_file_resolves_relative_to_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = export_to(temp_dir.path(), false);
        let path = manifest.write_to(temp_dir.path()).unwrap();

        let report = Verifier::verify_manifest_file(&path).unwrap();
        assert_eq!(report.passed, 2);
    }
}
