//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use super::progress::PageRange;
use crate::adapters::sink::{ArtifactKind, ArtifactReceipt};
use crate::domain::realm::RealmRef;
use crate::domain::{ExportStage, KeyportError, RealmName};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of exporting one realm
#[derive(Debug, Clone)]
pub struct RealmExportReport {
    pub realm: RealmRef,

    /// User count read in the metadata transaction
    pub total_users: usize,

    /// Users actually written, embedded or paged
    pub users_exported: usize,

    /// Page ranges written, in order
    pub pages: Vec<PageRange>,

    /// Every artifact written for this realm, in write order
    pub artifacts: Vec<ArtifactReceipt>,

    pub duration: Duration,
}

impl RealmExportReport {
    /// Report for a realm whose metadata artifact has been written
    pub fn new(realm: RealmRef, total_users: usize, realm_artifact: ArtifactReceipt) -> Self {
        Self {
            realm,
            total_users,
            users_exported: realm_artifact.users,
            pages: Vec::new(),
            artifacts: vec![realm_artifact],
            duration: Duration::from_secs(0),
        }
    }

    /// Record a written user page
    pub fn record_page(&mut self, page: PageRange, receipt: ArtifactReceipt) {
        self.users_exported += receipt.users;
        self.pages.push(page);
        self.artifacts.push(receipt);
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Names of the artifacts written, in order
    pub fn artifact_names(&self) -> Vec<String> {
        self.artifacts.iter().map(|a| a.name.to_string()).collect()
    }

    /// Number of user page artifacts
    pub fn page_artifacts(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::Users)
            .count()
    }
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of realms captured by enumeration
    pub total_realms: usize,

    /// Number of realms exported completely
    pub realms_exported: usize,

    /// Number of realms skipped after a failure
    pub realms_failed: usize,

    /// Total users written across all realms, failed ones included
    pub total_users: usize,

    /// Total artifacts written across all realms
    pub artifacts_written: usize,

    /// Whether artifacts were only encoded, not persisted
    pub dry_run: bool,

    /// Set when a failure stopped the run before every realm was attempted
    pub aborted: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Per-realm results, in export order
    pub realms: Vec<RealmExportReport>,

    /// Failed realms, with whatever they wrote before failing
    pub errors: Vec<ExportFailure>,

    written: Vec<ArtifactReceipt>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_realms: 0,
            realms_exported: 0,
            realms_failed: 0,
            total_users: 0,
            artifacts_written: 0,
            dry_run: false,
            aborted: false,
            duration: Duration::from_secs(0),
            realms: Vec::new(),
            errors: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a completed realm
    pub fn record_realm(&mut self, report: RealmExportReport) {
        self.realms_exported += 1;
        self.total_users += report.users_exported;
        self.artifacts_written += report.artifacts.len();
        self.written.extend(report.artifacts.iter().cloned());
        self.realms.push(report);
    }

    /// Record a realm that failed, keeping the artifacts it did write
    pub fn add_error(&mut self, error: ExportFailure) {
        self.realms_failed += 1;
        self.total_users += error.artifacts.iter().map(|a| a.users).sum::<usize>();
        self.artifacts_written += error.artifacts.len();
        self.written.extend(error.artifacts.iter().cloned());
        self.errors.push(error);
    }

    /// Mark the run as stopped early
    pub fn mark_aborted(&mut self) {
        self.aborted = true;
    }

    /// All artifacts written during the run, in write order
    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactReceipt> {
        self.written.iter()
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty() && !self.aborted
    }

    /// Every enumerated realm was attempted and none failed
    pub fn is_complete(&self) -> bool {
        self.is_successful() && self.realms_exported == self.total_realms
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_realms = self.total_realms,
            realms_exported = self.realms_exported,
            realms_failed = self.realms_failed,
            total_users = self.total_users,
            artifacts_written = self.artifacts_written,
            dry_run = self.dry_run,
            aborted = self.aborted,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    realm = %error.realm,
                    error_type = ?error.error_type,
                    stage = ?error.stage,
                    artifacts_written = error.artifacts.len(),
                    message = %error.message,
                    "Realm export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// A run stopped by a failure, with everything recorded up to that point
#[derive(Debug)]
pub struct AbortedExport {
    pub summary: ExportSummary,
    pub error: KeyportError,
}

/// Type of export failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFailureType {
    /// Backing store failure
    Store,
    /// Realm no longer resolves
    RealmNotFound,
    /// Artifact could not be written
    Write,
    /// Anything else
    Unknown,
}

impl ExportFailureType {
    /// Classify an error by its root cause
    pub fn of(error: &KeyportError) -> Self {
        match error.root_cause() {
            KeyportError::Store(_) => Self::Store,
            KeyportError::RealmNotFound(_) => Self::RealmNotFound,
            KeyportError::Write(_) => Self::Write,
            _ => Self::Unknown,
        }
    }
}

/// A realm export failure with the realm and page that were in progress
#[derive(Debug, Clone)]
pub struct ExportFailure {
    pub realm: RealmName,
    pub error_type: ExportFailureType,
    pub stage: Option<ExportStage>,
    pub message: String,

    /// Artifacts written for the realm before the failure
    pub artifacts: Vec<ArtifactReceipt>,
}

impl ExportFailure {
    /// Build a failure record from an error raised while exporting `realm`
    pub fn from_error(realm: RealmName, error: &KeyportError) -> Self {
        Self {
            realm,
            error_type: ExportFailureType::of(error),
            stage: error.stage().copied(),
            message: error.root_cause().to_string(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_artifacts(mut self, artifacts: Vec<ArtifactReceipt>) -> Self {
        self.artifacts = artifacts;
        self
    }
}
