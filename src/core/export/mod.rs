//! Export orchestration and pagination
//!
//! This module provides the core export logic for Keyport, including:
//! - Realm enumeration in a single transaction
//! - Paginated per-realm export, one transaction per user page
//! - Export coordination and summary reporting

pub mod coordinator;
pub mod driver;
pub mod enumerator;
pub mod paging;
pub mod progress;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use driver::PaginatedExportDriver;
pub use enumerator::list_realms;
pub use paging::UserPaging;
pub use progress::{ExportProgress, PageRange};
pub use summary::{
    AbortedExport, ExportFailure, ExportFailureType, ExportSummary, RealmExportReport,
};
