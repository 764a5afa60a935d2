//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main Keyport error type
///
/// This is the primary error type used throughout the application.
/// It wraps store and sink failures and carries the realm/page context
/// of an aborted export.
#[derive(Debug, Error)]
pub enum KeyportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Artifact sink errors
    #[error("Write error: {0}")]
    Write(#[from] SinkError),

    /// The realm name no longer resolves at transaction time
    #[error("Realm not found: {0}")]
    RealmNotFound(String),

    /// A realm export was aborted while processing `stage`
    #[error("Export of realm '{realm}' aborted during {stage}: {source}")]
    RealmExport {
        realm: String,
        stage: ExportStage,
        #[source]
        source: Box<KeyportError>,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Post-export verification errors
    #[error("Verification error: {0}")]
    Verification(String),
}

impl KeyportError {
    /// Wraps this error with the realm and stage that were in progress
    pub fn in_stage(self, realm: impl Into<String>, stage: ExportStage) -> Self {
        KeyportError::RealmExport {
            realm: realm.into(),
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, unwrapping any realm export context
    pub fn root_cause(&self) -> &KeyportError {
        match self {
            KeyportError::RealmExport { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether the underlying failure is a realm that no longer resolves
    pub fn is_realm_not_found(&self) -> bool {
        matches!(self.root_cause(), KeyportError::RealmNotFound(_))
    }

    /// Stage that was in progress, if this error carries export context
    pub fn stage(&self) -> Option<&ExportStage> {
        match self {
            KeyportError::RealmExport { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

/// Step of a realm export in which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ExportStage {
    /// The metadata transaction (realm representation and user count)
    Metadata,
    /// A user page transaction covering `[start, end)`
    Page {
        index: usize,
        start: usize,
        end: usize,
    },
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStage::Metadata => write!(f, "realm metadata"),
            ExportStage::Page { index, start, end } => {
                write!(f, "user page {index} (users {start}-{end})")
            }
        }
    }
}

/// Backing store errors
///
/// Raised by store adapters when a transaction cannot be opened, executed
/// or committed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or opened
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The transaction was aborted by the store
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    /// The stored data could not be decoded
    #[error("Corrupt store data: {0}")]
    Corrupted(String),
}

/// Artifact sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to create the output location
    #[error("Failed to prepare output location {path}: {message}")]
    OutputUnavailable { path: String, message: String },

    /// Failed to persist an artifact
    #[error("Failed to write artifact '{artifact}': {message}")]
    WriteFailed { artifact: String, message: String },

    /// Failed to encode an artifact payload
    #[error("Failed to encode artifact '{artifact}': {message}")]
    EncodeFailed { artifact: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for KeyportError {
    fn from(err: std::io::Error) -> Self {
        KeyportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for KeyportError {
    fn from(err: serde_json::Error) -> Self {
        KeyportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for KeyportError {
    fn from(err: toml::de::Error) -> Self {
        KeyportError::Configuration(format!("TOML parse error: {err}"))
    }
}
