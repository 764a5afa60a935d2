//! Outcome of checking an export directory against its manifest

use crate::adapters::sink::ArtifactReceipt;
use crate::domain::{ArtifactName, RealmName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

/// Tally of one verification pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub checked_at: DateTime<Utc>,

    /// Artifacts whose bytes match the manifest
    pub passed: usize,

    pub failed: usize,

    /// Manifest entries that were never persisted (dry runs)
    pub skipped: usize,

    /// Users held by the artifacts that passed
    pub users_verified: usize,

    pub failures: Vec<VerificationFailure>,

    pub duration_ms: u64,
}

/// An artifact that is missing or differs from its manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub artifact: ArtifactName,
    pub realm: RealmName,
    pub file: String,
    pub expected_checksum: String,

    /// `None` when the file could not be read
    pub actual_checksum: Option<String>,

    pub reason: String,
}

impl VerificationFailure {
    pub fn for_receipt(
        receipt: &ArtifactReceipt,
        file: &str,
        actual_checksum: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            artifact: receipt.name.clone(),
            realm: receipt.realm.clone(),
            file: file.to_string(),
            expected_checksum: receipt.checksum.clone(),
            actual_checksum,
            reason: reason.into(),
        }
    }
}

impl VerificationReport {
    pub fn new() -> Self {
        Self {
            checked_at: Utc::now(),
            passed: 0,
            failed: 0,
            skipped: 0,
            users_verified: 0,
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_pass(&mut self, receipt: &ArtifactReceipt) {
        self.passed += 1;
        self.users_verified += receipt.users;
    }

    pub fn record_failure(&mut self, failure: VerificationFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn finish(mut self, elapsed: Duration) -> Self {
        self.duration_ms = elapsed.as_millis() as u64;
        self
    }

    /// Manifest entries looked at, whatever their outcome
    pub fn artifacts_checked(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Number of failing artifacts per realm, in realm name order
    pub fn failures_by_realm(&self) -> BTreeMap<&RealmName, usize> {
        let mut by_realm = BTreeMap::new();
        for failure in &self.failures {
            *by_realm.entry(&failure.realm).or_insert(0) += 1;
        }
        by_realm
    }

    /// Multi-line, human-readable rendering
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Checked {} artifact(s) in {} ms: {} ok, {} failed, {} skipped",
            self.artifacts_checked(),
            self.duration_ms,
            self.passed,
            self.failed,
            self.skipped
        );
        let _ = writeln!(out, "Users in verified artifacts: {}", self.users_verified);

        for (realm, count) in self.failures_by_realm() {
            let _ = writeln!(out, "Realm {realm}: {count} failing artifact(s)");
            for failure in self.failures.iter().filter(|f| &f.realm == realm) {
                let _ = writeln!(out, "  {} ({}): {}", failure.artifact, failure.file, failure.reason);
            }
        }
        out
    }
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self::new()
    }
}
