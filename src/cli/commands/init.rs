//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "keyport.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Keyport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and point store.path at your dataset", self.output);
                println!("  2. Validate configuration: keyport validate-config");
                println!("  3. Check the store: keyport list-realms");
                println!("  4. Run export: keyport export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> String {
        r#"# Keyport Configuration File
# Bulk realm and user export

[application]
log_level = "info"
dry_run = false

[store]
# JSON dataset to export from; ${VAR} references are expanded
path = "data/realms.json"

[export]
# < 0: users embedded in <realm>-realm.json
#   0: all users in <realm>-users-0.json
# > 0: this many users per <realm>-users-<n>.json
users_per_file = 50
output_dir = "export"
# realm = "master"
continue_on_error = false
pretty = false

[verification]
enable_verification = true

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_is_valid() {
        let config = crate::config::parse_config(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.export.users_per_file, 50);
        assert!(config.verification.enable_verification);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("keyport.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[export]"));
    }
}
