//! Verify command implementation
//!
//! Re-checks an export directory against its manifest.

use super::export::print_verification;
use crate::config::load_config;
use crate::core::verification::{ExportManifest, Verifier};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Manifest to verify (defaults to the manifest in the configured output directory)
    #[arg(short, long)]
    pub manifest: Option<String>,
}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let manifest_path = match &self.manifest {
            Some(path) => PathBuf::from(path),
            None => match load_config(config_path) {
                Ok(config) => ExportManifest::path_in(&config.export.output_dir),
                Err(e) => {
                    println!("❌ Failed to load configuration file");
                    println!("   Error: {e}");
                    return Ok(2);
                }
            },
        };

        tracing::info!(manifest = %manifest_path.display(), "Verifying export");
        println!("🔍 Verifying export manifest: {}", manifest_path.display());
        println!();

        let report = match Verifier::verify_manifest_file(&manifest_path) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to verify export");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        print_verification(&report);

        if report.is_success() {
            println!("✅ All artifacts verified");
            Ok(0)
        } else {
            println!("❌ Verification found {} failing artifact(s)", report.failed);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_manifest_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let args = VerifyArgs {
            manifest: Some(
                temp_dir
                    .path()
                    .join("export-manifest.json")
                    .to_string_lossy()
                    .to_string(),
            ),
        };
        assert_eq!(args.execute("unused.toml").unwrap(), 5);
    }
}
