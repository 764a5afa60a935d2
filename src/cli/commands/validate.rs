//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Keyport configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Store: {}", config.store.path);
        println!("  Paging: {}", config.export.paging());
        println!("  Output Directory: {}", config.export.output_dir);
        println!(
            "  Realm: {}",
            config.export.realm.as_deref().unwrap_or("All")
        );
        println!("  Continue On Error: {}", config.export.continue_on_error);
        println!("  Dry Run: {}", config.is_dry_run());
        println!(
            "  Verification: {}",
            config.verification.enable_verification
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_reports_exit_codes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("keyport.toml");

        std::fs::write(&path, "[store]\npath = \"realms.json\"\n").unwrap();
        assert_eq!(ValidateArgs {}.execute(path.to_str().unwrap()).unwrap(), 0);

        std::fs::write(
            &path,
            "[store]\npath = \"realms.json\"\n[application]\nlog_level = \"loud\"\n",
        )
        .unwrap();
        assert_eq!(ValidateArgs {}.execute(path.to_str().unwrap()).unwrap(), 2);
    }
}
