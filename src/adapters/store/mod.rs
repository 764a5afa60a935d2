//! Backing store abstraction layer
//!
//! This module provides a trait-based abstraction for the transactional
//! store the export reads from, plus two bundled implementations.

pub mod dataset;
pub mod file;
pub mod memory;
pub mod traits;

pub use dataset::{Dataset, DatasetSession};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{StoreSession, TransactionalStore};
