//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - JSON-formatted local log files with rotation
//! - Configurable log levels, overridable through `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use keyport::logging::init_logging;
//! use keyport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log that a realm metadata artifact was written
///
/// # Example
///
/// ```no_run
/// use keyport::log_realm_exported;
/// use keyport::domain::RealmName;
///
/// let realm = RealmName::new("acme").unwrap();
/// log_realm_exported!(&realm, 0);
/// ```
#[macro_export]
macro_rules! log_realm_exported {
    ($realm:expr, $embedded_users:expr) => {
        tracing::info!(
            realm = %$realm,
            embedded_users = $embedded_users,
            "Realm exported"
        );
    };
}

/// Log that one page of users was written
///
/// # Example
///
/// ```no_run
/// use keyport::log_page_exported;
/// use keyport::domain::RealmName;
///
/// let realm = RealmName::new("acme").unwrap();
/// log_page_exported!(&realm, 100, 200, 100);
/// ```
#[macro_export]
macro_rules! log_page_exported {
    ($realm:expr, $page_start:expr, $page_end:expr, $users:expr) => {
        tracing::info!(
            realm = %$realm,
            page_start = $page_start,
            page_end = $page_end,
            users = $users,
            "Users exported"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use keyport::log_error_with_context;
/// use keyport::domain::KeyportError;
///
/// let error = KeyportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
