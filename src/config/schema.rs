//! Configuration schema types
//!
//! This module defines the configuration structure for Keyport.

use crate::core::export::UserPaging;
use serde::{Deserialize, Serialize};

/// Main Keyport configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section except `[store]` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Backing store to export from
    pub store: StoreConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Data verification configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KeyportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.export.validate()?;
        self.verification.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Whether this is a dry run, from either `[application]` or `[export]`
    pub fn is_dry_run(&self) -> bool {
        self.application.dry_run || self.export.dry_run
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (encode and checksum artifacts without writing them)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Backing store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON dataset file
    pub path: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("store.path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Users per page artifact
    ///
    /// Negative embeds users in the realm artifact, zero writes all users
    /// into a single page artifact.
    #[serde(default = "default_users_per_file")]
    pub users_per_file: i64,

    /// Directory artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Export only this realm
    #[serde(default)]
    pub realm: Option<String>,

    /// Skip failing realms instead of aborting the run
    #[serde(default)]
    pub continue_on_error: bool,

    /// Pretty-print artifact JSON
    #[serde(default)]
    pub pretty: bool,

    /// Dry run mode
    #[serde(default)]
    pub dry_run: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if let Some(realm) = &self.realm {
            crate::domain::RealmName::new(realm.as_str())
                .map_err(|e| format!("Invalid export.realm: {e}"))?;
        }

        Ok(())
    }

    /// Paging policy derived from `users_per_file`
    pub fn paging(&self) -> UserPaging {
        UserPaging::from_users_per_file(self.users_per_file)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            users_per_file: default_users_per_file(),
            output_dir: default_output_dir(),
            realm: None,
            continue_on_error: false,
            pretty: false,
            dry_run: false,
        }
    }
}

/// Data verification configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VerificationConfig {
    /// Verify written artifacts against the manifest after export
    #[serde(default)]
    pub enable_verification: bool,
}

impl VerificationConfig {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_users_per_file() -> i64 {
    50
}

fn default_output_dir() -> String {
    "export".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> KeyportConfig {
        toml::from_str("[store]\npath = \"data/realms.json\"\n").unwrap()
    }

    #[test]
    fn test_default_values() {
        let config = minimal();

        assert_eq!(config.application.log_level, "info");
        assert!(!config.application.dry_run);
        assert_eq!(config.export.users_per_file, 50);
        assert_eq!(config.export.output_dir, "export");
        assert!(config.export.realm.is_none());
        assert!(!config.export.continue_on_error);
        assert!(!config.verification.enable_verification);
        assert!(!config.logging.local_enabled);
        assert_eq!(config.logging.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_path_required() {
        let config = StoreConfig {
            path: "  ".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.realm = Some("../etc".to_string());
        assert!(config.validate().is_err());

        config.realm = Some("acme".to_string());
        assert!(config.validate().is_ok());

        config.output_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_paging() {
        let mut config = ExportConfig::default();
        assert_eq!(config.paging(), UserPaging::from_users_per_file(50));

        config.users_per_file = -1;
        assert!(config.paging().users_into_same_file());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dry_run_from_either_section() {
        let mut config = minimal();
        assert!(!config.is_dry_run());

        config.export.dry_run = true;
        assert!(config.is_dry_run());

        config.export.dry_run = false;
        config.application.dry_run = true;
        assert!(config.is_dry_run());
    }
}
