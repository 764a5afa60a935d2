//! Paginated realm export
//!
//! Exports one realm as a metadata transaction followed by one transaction
//! per user page. No transaction covers more than one page, and each page
//! transaction starts only after the previous one has finished.

use super::paging::UserPaging;
use super::progress::ExportProgress;
use super::summary::RealmExportReport;
use crate::adapters::sink::{ArtifactReceipt, RealmWriter, UserPageWriter};
use crate::adapters::store::TransactionalStore;
use crate::domain::{ArtifactName, ExportStage, RealmName, Result};
use crate::{log_page_exported, log_realm_exported};
use std::time::Instant;

/// Drives the export of a single realm
#[derive(Debug, Clone, Copy)]
pub struct PaginatedExportDriver {
    paging: UserPaging,
}

impl PaginatedExportDriver {
    pub fn new(paging: UserPaging) -> Self {
        Self { paging }
    }

    pub fn paging(&self) -> UserPaging {
        self.paging
    }

    /// Export realm `name` from `store` through `writer`
    ///
    /// 1. Metadata transaction: resolve the realm, write `<realm>-realm`
    ///    (embedding users when paging is [`UserPaging::SameFile`]) and read
    ///    the user count.
    /// 2. One transaction per page: re-resolve the realm, read users
    ///    `[start, end)` and write `<realm>-users-<index>`.
    ///
    /// # Errors
    ///
    /// Any failure aborts the rest of the realm and is returned wrapped in
    /// `KeyportError::RealmExport` naming the stage that was in progress.
    /// A realm that no longer resolves surfaces as `RealmNotFound`.
    pub fn export_realm<S, W>(&self, store: &S, writer: &W, name: &RealmName) -> Result<RealmExportReport>
    where
        S: TransactionalStore,
        W: RealmWriter + UserPageWriter,
    {
        self.export_realm_tracked(store, writer, name, &mut Vec::new())
    }

    /// Same as [`Self::export_realm`], also pushing every receipt onto
    /// `written` as soon as its artifact is persisted
    ///
    /// On failure `written` still holds the artifacts that made it out
    /// before the failing stage.
    pub fn export_realm_tracked<S, W>(
        &self,
        store: &S,
        writer: &W,
        name: &RealmName,
        written: &mut Vec<ArtifactReceipt>,
    ) -> Result<RealmExportReport>
    where
        S: TransactionalStore,
        W: RealmWriter + UserPageWriter,
    {
        let start_time = Instant::now();
        let same_file = self.paging.users_into_same_file();

        let mut report = store
            .run_in_transaction(|session| {
                let realm = session.lookup_realm_by_name(name)?;
                let snapshot = session.build_realm_representation(&realm, same_file)?;
                let receipt = writer.write_realm(&ArtifactName::realm(name), &snapshot)?;
                written.push(receipt.clone());
                log_realm_exported!(name, receipt.users);

                let total_count = if same_file {
                    snapshot.embedded_user_count()
                } else {
                    session.count_users(&realm)?
                };
                Ok(RealmExportReport::new(realm, total_count, receipt))
            })
            .map_err(|e| e.in_stage(name.as_str(), ExportStage::Metadata))?;

        let Some(count_per_page) = self.paging.page_size(report.total_users) else {
            return Ok(report.with_duration(start_time.elapsed()));
        };

        let mut progress = ExportProgress::new(report.total_users);
        while let Some(page) = progress.next_page(count_per_page) {
            let stage = ExportStage::Page {
                index: page.index,
                start: page.start,
                end: page.end,
            };

            let receipt = store
                .run_in_transaction(|session| {
                    let realm = session.lookup_realm_by_name(name)?;
                    let users = session.read_user_slice(&realm, page.start, page.end)?;
                    let receipt =
                        writer.write_users(&ArtifactName::users(name, page.index), &realm, &users)?;
                    written.push(receipt.clone());
                    Ok(receipt)
                })
                .map_err(|e| e.in_stage(name.as_str(), stage))?;

            if receipt.users < page.len() {
                tracing::warn!(
                    realm = %name,
                    page_index = page.index,
                    expected = page.len(),
                    actual = receipt.users,
                    "Realm shrank during export, page is short"
                );
            }
            log_page_exported!(name, page.start, page.end, receipt.users);

            report.record_page(page, receipt);
            progress = progress.advance(page);
        }

        debug_assert!(progress.is_complete());
        Ok(report.with_duration(start_time.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::MemoryWriter;
    use crate::adapters::store::MemoryStore;
    use crate::domain::{RealmId, RealmRecord, UserRecord};

    fn store_with_users(realm: &str, users: usize) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_realm(RealmRecord::new(
                RealmId::new(format!("id-{realm}")).unwrap(),
                RealmName::new(realm).unwrap(),
            ))
            .unwrap();
        for i in 0..users {
            store
                .add_user(
                    realm,
                    UserRecord::builder()
                        .id(format!("u-{i:04}"))
                        .username(format!("user{i:04}"))
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        store
    }

    fn acme() -> RealmName {
        RealmName::new("acme").unwrap()
    }

    #[test]
    fn test_one_transaction_per_page() {
        let store = store_with_users("acme", 250);
        let writer = MemoryWriter::new();
        let driver = PaginatedExportDriver::new(UserPaging::from_users_per_file(100));

        let report = driver.export_realm(&store, &writer, &acme()).unwrap();

        assert_eq!(store.transaction_count(), 4);
        assert_eq!(report.total_users, 250);
        assert_eq!(report.users_exported, 250);
        assert_eq!(report.pages.len(), 3);
    }

    #[test]
    fn test_same_file_uses_single_transaction() {
        let store = store_with_users("acme", 5);
        let writer = MemoryWriter::new();
        let driver = PaginatedExportDriver::new(UserPaging::from_users_per_file(-1));

        let report = driver.export_realm(&store, &writer, &acme()).unwrap();

        assert_eq!(store.transaction_count(), 1);
        assert_eq!(report.total_users, 5);
        assert!(report.pages.is_empty());
        assert_eq!(writer.names(), vec!["acme-realm"]);
    }

    #[test]
    fn test_missing_realm_fails_in_metadata_stage() {
        let store = MemoryStore::new();
        let writer = MemoryWriter::new();
        let driver = PaginatedExportDriver::new(UserPaging::default());

        let err = driver.export_realm(&store, &writer, &acme()).unwrap_err();

        assert!(err.is_realm_not_found());
        assert_eq!(err.stage(), Some(&ExportStage::Metadata));
        assert!(writer.names().is_empty());
    }

    #[test]
    fn test_write_failure_aborts_remaining_pages() {
        let store = store_with_users("acme", 30);
        let writer = MemoryWriter::failing_on("acme-users-1");
        let driver = PaginatedExportDriver::new(UserPaging::from_users_per_file(10));

        let err = driver.export_realm(&store, &writer, &acme()).unwrap_err();

        assert_eq!(
            err.stage(),
            Some(&ExportStage::Page {
                index: 1,
                start: 10,
                end: 20
            })
        );
        assert_eq!(writer.names(), vec!["acme-realm", "acme-users-0"]);
    }

    #[test]
    fn test_tracked_export_keeps_receipts_written_before_failure() {
        let store = store_with_users("acme", 30);
        let writer = MemoryWriter::failing_on("acme-users-2");
        let driver = PaginatedExportDriver::new(UserPaging::from_users_per_file(10));
        let mut written = Vec::new();

        let err = driver
            .export_realm_tracked(&store, &writer, &acme(), &mut written)
            .unwrap_err();

        assert!(matches!(err.stage(), Some(ExportStage::Page { index: 2, .. })));
        let names: Vec<String> = written.iter().map(|r| r.name.to_string()).collect();
        assert_eq!(names, vec!["acme-realm", "acme-users-0", "acme-users-1"]);
        assert_eq!(written.iter().map(|r| r.users).sum::<usize>(), 20);
    }
}
