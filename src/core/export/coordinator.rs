//! Export coordinator - main orchestrator for the export process
//!
//! Enumerates realms once, then exports them one after another through the
//! paginated driver. Realms are processed strictly sequentially.

use super::driver::PaginatedExportDriver;
use super::enumerator::list_realms;
use super::paging::UserPaging;
use super::summary::{AbortedExport, ExportFailure, ExportSummary, RealmExportReport};
use crate::adapters::sink::{RealmWriter, UserPageWriter};
use crate::adapters::store::TransactionalStore;
use crate::domain::{KeyportError, RealmName, Result};
use crate::log_error_with_context;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator<S, W> {
    store: S,
    writer: W,
    driver: PaginatedExportDriver,
    continue_on_error: bool,
    dry_run: bool,
}

impl<S, W> ExportCoordinator<S, W>
where
    S: TransactionalStore,
    W: RealmWriter + UserPageWriter,
{
    /// Create a new export coordinator
    pub fn new(store: S, writer: W, paging: UserPaging) -> Self {
        Self {
            store,
            writer,
            driver: PaginatedExportDriver::new(paging),
            continue_on_error: false,
            dry_run: false,
        }
    }

    /// Skip failing realms instead of aborting the run
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Mark the run as a dry run in the summary
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn paging(&self) -> UserPaging {
        self.driver.paging()
    }

    /// Export every realm in the store
    ///
    /// The realm list is captured once, up front. Realms created afterwards
    /// are not exported by this run.
    ///
    /// # Errors
    ///
    /// Enumeration failures always propagate. A realm failure propagates
    /// unless `continue_on_error` is set, in which case it is recorded in
    /// [`ExportSummary::errors`] and the next realm is exported.
    pub fn export_all(&self) -> Result<ExportSummary> {
        self.run_all().map_err(|aborted| aborted.error)
    }

    /// Like [`Self::export_all`], but an aborted run hands back what it
    /// recorded before stopping
    ///
    /// The failed realm is in [`ExportSummary::errors`] together with the
    /// artifacts it wrote, and the summary is marked aborted.
    pub fn run_all(&self) -> std::result::Result<ExportSummary, AbortedExport> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.dry_run;

        tracing::info!(
            store = %self.store.describe(),
            paging = %self.driver.paging(),
            continue_on_error = self.continue_on_error,
            "Starting export process"
        );

        let realms = match list_realms(&self.store) {
            Ok(realms) => realms,
            Err(error) => {
                log_error_with_context!(&error, "Realm enumeration failed");
                summary.mark_aborted();
                return Err(AbortedExport { summary, error });
            }
        };
        summary.total_realms = realms.len();

        for realm in realms {
            if let Err(error) = self.export_into(&realm.name, &mut summary) {
                return Err(self.abort(summary, error, start_time));
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Export a single realm by name
    ///
    /// # Errors
    ///
    /// Returns `RealmNotFound` (wrapped with export context) when no realm
    /// by that name exists.
    pub fn export_realm(&self, name: &RealmName) -> Result<RealmExportReport> {
        self.driver.export_realm(&self.store, &self.writer, name)
    }

    /// Export only realm `name`, summarized like a full run
    ///
    /// Failures always propagate, regardless of `continue_on_error`.
    pub fn export_selected(&self, name: &RealmName) -> Result<ExportSummary> {
        self.run_selected(name).map_err(|aborted| aborted.error)
    }

    /// Like [`Self::export_selected`], keeping the summary on failure
    pub fn run_selected(&self, name: &RealmName) -> std::result::Result<ExportSummary, AbortedExport> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.dry_run;
        summary.total_realms = 1;

        tracing::info!(
            store = %self.store.describe(),
            realm = %name,
            paging = %self.driver.paging(),
            "Starting single realm export"
        );

        let mut written = Vec::new();
        match self
            .driver
            .export_realm_tracked(&self.store, &self.writer, name, &mut written)
        {
            Ok(report) => summary.record_realm(report),
            Err(error) => {
                summary.add_error(ExportFailure::from_error(name.clone(), &error).with_artifacts(written));
                return Err(self.abort(summary, error, start_time));
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Export one realm into `summary`
    ///
    /// A failure is always recorded; it is returned only when the run
    /// should stop.
    fn export_into(&self, name: &RealmName, summary: &mut ExportSummary) -> Result<()> {
        let mut written = Vec::new();
        match self
            .driver
            .export_realm_tracked(&self.store, &self.writer, name, &mut written)
        {
            Ok(report) => {
                summary.record_realm(report);
                Ok(())
            }
            Err(e) => {
                summary.add_error(ExportFailure::from_error(name.clone(), &e).with_artifacts(written));
                if self.continue_on_error {
                    log_error_with_context!(&e, "Skipping realm after failed export");
                    Ok(())
                } else {
                    Err(e)
                }
            }
        }
    }

    fn abort(&self, mut summary: ExportSummary, error: KeyportError, start_time: Instant) -> AbortedExport {
        log_error_with_context!(&error, "Aborting export");
        summary.mark_aborted();
        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        AbortedExport { summary, error }
    }
}
