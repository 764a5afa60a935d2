//! External system integrations for Keyport.
//!
//! - [`store`] - Transactional realm store abstraction (trait-based) with
//!   file and in-memory implementations
//! - [`sink`] - Artifact writer capabilities with directory and in-memory
//!   implementations
//!
//! # Design Pattern
//!
//! Adapters isolate the export pipeline from where realms are read and where
//! artifacts go, so the same driver runs against a dataset file in
//! production and against in-memory doubles in tests:
//!
//! ```rust
//! use keyport::adapters::sink::MemoryWriter;
//! use keyport::adapters::store::MemoryStore;
//! use keyport::core::export::{ExportCoordinator, UserPaging};
//!
//! # fn example() -> keyport::domain::Result<()> {
//! let store = MemoryStore::new();
//! let writer = MemoryWriter::new();
//! let coordinator = ExportCoordinator::new(&store, &writer, UserPaging::from_users_per_file(50));
//! let summary = coordinator.export_all()?;
//! assert_eq!(summary.total_realms, 0);
//! # Ok(())
//! # }
//! ```

pub mod sink;
pub mod store;
