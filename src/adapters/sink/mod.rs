//! Artifact sinks
//!
//! Writer capabilities the export driver delegates persistence to, with a
//! directory-backed and an in-memory implementation.

pub mod directory;
pub mod memory;
pub mod traits;

pub use directory::DirectoryWriter;
pub use memory::{MemoryArtifact, MemoryWriter, StoredArtifact};
pub use traits::{ArtifactKind, ArtifactReceipt, RealmWriter, UserPageWriter};
