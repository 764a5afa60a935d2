//! Core business logic for Keyport.
//!
//! This module contains the export orchestration and post-export verification.
//!
//! # Modules
//!
//! - [`export`] - Realm enumeration, paginated export and coordination
//! - [`verification`] - Export manifest and checksum verification
//!
//! # Export Workflow
//!
//! 1. **Enumerate**: List all realms in one read transaction
//! 2. **Metadata**: Per realm, write the realm artifact and read the user count
//! 3. **Pages**: Per page, open a fresh transaction, read one slice of users and write it
//! 4. **Report**: Aggregate an export summary
//! 5. **Manifest**: Record artifacts and checksums for later verification
//!
//! # Example
//!
//! ```rust
//! use keyport::adapters::sink::MemoryWriter;
//! use keyport::adapters::store::MemoryStore;
//! use keyport::core::export::{ExportCoordinator, UserPaging};
//!
//! let store = MemoryStore::new();
//! let writer = MemoryWriter::new();
//! let coordinator = ExportCoordinator::new(&store, &writer, UserPaging::from_users_per_file(100));
//!
//! let summary = coordinator.export_all()?;
//! println!("Realms: {}", summary.total_realms);
//! println!("Users: {}", summary.total_users);
//! # Ok::<(), keyport::domain::KeyportError>(())
//! ```

pub mod export;
pub mod verification;
