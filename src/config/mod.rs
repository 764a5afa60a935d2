//! Configuration management for Keyport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Keyport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `KEYPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use keyport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("keyport.toml")?;
//!
//! println!("Store: {}", config.store.path);
//! println!("Users per file: {}", config.export.users_per_file);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry run
//! - [`StoreConfig`] - Dataset file to export from
//! - [`ExportConfig`] - Paging, output directory, realm filter, error policy
//! - [`VerificationConfig`] - Post-export verification
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! path = "${KEYPORT_DATA_DIR}/realms.json"
//!
//! [export]
//! users_per_file = 100
//! output_dir = "export"
//! continue_on_error = false
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, KeyportConfig, LoggingConfig, StoreConfig,
    VerificationConfig,
};
