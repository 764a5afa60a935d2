//! Data verification for post-export validation
//!
//! This module records what an export wrote (the manifest) and verifies
//! exported artifacts against those records by recomputing checksums.

pub mod checksum;
pub mod manifest;
pub mod report;
pub mod verify;

pub use manifest::{ExportManifest, ManifestFailure, ManifestRealm, MANIFEST_FILE_NAME};
pub use report::{VerificationFailure, VerificationReport};
pub use verify::Verifier;
