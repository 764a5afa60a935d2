//! Export command implementation
//!
//! This module implements the `export` command for exporting realms and
//! users from the configured store into an output directory.

use super::exit_code_for;
use crate::adapters::sink::DirectoryWriter;
use crate::adapters::store::FileStore;
use crate::config::{load_config, KeyportConfig};
use crate::core::export::{AbortedExport, ExportCoordinator, ExportSummary};
use crate::core::verification::{ExportManifest, VerificationReport, Verifier};
use crate::domain::{KeyportError, RealmName};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - encode and checksum artifacts without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Export only this realm
    #[arg(long)]
    pub realm: Option<String>,

    /// Override users per file (negative embeds users in the realm file)
    #[arg(long, allow_negative_numbers = true)]
    pub users_per_file: Option<i64>,

    /// Override output directory
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut KeyportConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }
        if let Some(realm) = &self.realm {
            tracing::info!(realm = %realm, "Overriding realm from CLI");
            config.export.realm = Some(realm.clone());
        }
        if let Some(users_per_file) = self.users_per_file {
            tracing::info!(users_per_file, "Overriding users per file from CLI");
            config.export.users_per_file = users_per_file;
        }
        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }
    }

    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let dry_run = config.is_dry_run();
        if dry_run {
            tracing::info!("Dry run mode enabled - no artifacts will be written");
            println!("🔍 DRY RUN MODE - No artifacts will be written");
            println!();
        }

        let store = match FileStore::open(&config.store.path) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open store");
                eprintln!("Failed to open store: {e}");
                return Ok(4);
            }
        };

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Export Configuration:");
            println!("  Store: {}", config.store.path);
            println!("  Realm: {}", config.export.realm.as_deref().unwrap_or("All"));
            println!("  Paging: {}", config.export.paging());
            println!("  Output directory: {}", config.export.output_dir);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        let writer =
            match DirectoryWriter::new(&config.export.output_dir, config.export.pretty, dry_run) {
                Ok(w) => w,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to prepare output directory");
                    eprintln!("Failed to prepare output directory: {e}");
                    return Ok(5);
                }
            };

        let paging = config.export.paging();
        let coordinator = ExportCoordinator::new(&store, &writer, paging)
            .with_continue_on_error(config.export.continue_on_error)
            .with_dry_run(dry_run);

        println!("🚀 Starting export...");
        println!();

        let result = match &config.export.realm {
            Some(realm) => match RealmName::new(realm.as_str()) {
                Ok(name) => coordinator.run_selected(&name),
                Err(e) => {
                    let e = KeyportError::Validation(e);
                    tracing::error!(error = %e, "Invalid realm name");
                    eprintln!("Export failed: {e}");
                    return Ok(exit_code_for(&e));
                }
            },
            None => coordinator.run_all(),
        };

        let AbortedExport { summary, error } = match result {
            Ok(summary) => {
                print_summary(&summary);
                let mut verification_failed = false;
                if !dry_run {
                    if let Some(report) = write_manifest(&summary, &config)? {
                        verification_failed = !report.is_success();
                    }
                }

                let exit_code = if summary.is_successful() && !verification_failed {
                    println!("✅ Export completed successfully!");
                    0
                } else {
                    println!("⚠️  Export completed with failures");
                    1
                };
                return Ok(exit_code);
            }
            Err(aborted) => aborted,
        };

        tracing::error!(error = %error, "Export failed");
        eprintln!("Export failed: {error}");
        print_summary(&summary);

        if !dry_run {
            // The original error decides the exit code
            if let Err(e) = write_manifest(&summary, &config) {
                tracing::error!(error = %e, "Failed to write manifest of aborted export");
                eprintln!("Failed to write manifest: {e}");
            }
            println!("⚠️  Manifest records an incomplete export");
        }

        Ok(exit_code_for(&error))
    }
}

/// Write the manifest and, when enabled, verify the output against it
///
/// Returns the verification report if verification ran.
fn write_manifest(
    summary: &ExportSummary,
    config: &KeyportConfig,
) -> anyhow::Result<Option<VerificationReport>> {
    let manifest = ExportManifest::from_summary(summary, config.export.paging());
    let manifest_path = manifest.write_to(&config.export.output_dir)?;
    println!("📄 Manifest written to {}", manifest_path.display());
    println!();

    if !config.verification.enable_verification {
        return Ok(None);
    }
    tracing::info!("Running post-export verification");
    let report = Verifier::new(&config.export.output_dir).verify_export(&manifest);
    print_verification(&report);
    Ok(Some(report))
}

fn print_summary(summary: &ExportSummary) {
    println!("📊 Export Summary:");
    println!("  Total Realms: {}", summary.total_realms);
    println!("  Realms Exported: {}", summary.realms_exported);
    println!("  Realms Failed: {}", summary.realms_failed);
    println!("  Users Exported: {}", summary.total_users);
    println!("  Artifacts: {}", summary.artifacts_written);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    for realm in &summary.realms {
        println!(
            "  {} - {} users in {} page(s)",
            realm.realm.name,
            realm.users_exported,
            realm.page_artifacts()
        );
    }
    if !summary.realms.is_empty() {
        println!();
    }

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {} ({:?}): {}", error.realm, error.error_type, error.message);
            if let Some(stage) = &error.stage {
                println!("    During: {stage}");
            }
            if !error.artifacts.is_empty() {
                println!("    Artifacts written before failure: {}", error.artifacts.len());
            }
        }
        println!();
    }
}

pub(crate) fn print_verification(report: &VerificationReport) {
    println!("🔍 Verification Results:");
    println!("  Artifacts Checked: {}", report.artifacts_checked());
    println!("  Passed: {}", report.passed);
    println!("  Failed: {}", report.failed);
    println!("  Skipped: {}", report.skipped);
    println!("  Users Verified: {}", report.users_verified);

    if !report.failures.is_empty() {
        println!();
        println!("  ⚠️  Verification Failures:");
        for (realm, count) in report.failures_by_realm() {
            println!("    {realm}: {count} artifact(s)");
        }
        for failure in report.failures.iter().take(10) {
            println!("    - {} ({})", failure.artifact, failure.file);
            println!("      Reason: {}", failure.reason);
        }
        if report.failures.len() > 10 {
            println!("    ... and {} more failures", report.failures.len() - 10);
        }
    }
    println!();
}
