//! Domain models and types for Keyport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RealmId`], [`RealmName`], [`UserId`], [`ArtifactName`])
//! - **Domain models** ([`RealmRef`], [`RealmRecord`], [`RealmSnapshot`], [`UserRecord`])
//! - **Error types** ([`KeyportError`], [`StoreError`], [`SinkError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Realm names double as artifact name prefixes, so [`RealmName`] rejects
//! anything that could escape an output directory:
//!
//! ```rust
//! use keyport::domain::RealmName;
//!
//! assert!(RealmName::new("acme").is_ok());
//! assert!(RealmName::new("../acme").is_err());
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, KeyportError>`]. Errors raised
//! while exporting a realm carry the realm and page that were in progress:
//!
//! ```rust
//! use keyport::domain::{ExportStage, KeyportError};
//!
//! let err = KeyportError::RealmNotFound("acme".into()).in_stage("acme", ExportStage::Metadata);
//! assert!(err.is_realm_not_found());
//! ```

pub mod errors;
pub mod ids;
pub mod realm;
pub mod result;
pub mod user;

// Re-export commonly used types for convenience
pub use errors::{ExportStage, KeyportError, SinkError, StoreError};
pub use ids::{ArtifactName, RealmId, RealmName, UserId};
pub use realm::{RealmRecord, RealmRef, RealmSnapshot, UsersArtifact};
pub use result::Result;
pub use user::{UserRecord, UserRecordBuilder};
