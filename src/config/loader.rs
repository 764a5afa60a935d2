//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::KeyportConfig;
use crate::domain::errors::KeyportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into KeyportConfig
/// 4. Applies environment variable overrides (KEYPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - An override has an unparseable value
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use keyport::config::loader::load_config;
///
/// let config = load_config("keyport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<KeyportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(KeyportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        KeyportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, overrides and validation as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<KeyportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: KeyportConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        KeyportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| KeyportError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(KeyportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        KeyportError::Configuration(format!("Invalid value '{}' for {}", value, name))
    })
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Applies environment variable overrides using KEYPORT_* prefix
///
/// Environment variables follow the pattern: KEYPORT_<SECTION>_<KEY>
/// For example: KEYPORT_STORE_PATH, KEYPORT_EXPORT_USERS_PER_FILE
fn apply_env_overrides(config: &mut KeyportConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("KEYPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("KEYPORT_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("KEYPORT_APPLICATION_DRY_RUN", &val)?;
    }

    // Store overrides
    if let Some(val) = env_override("KEYPORT_STORE_PATH") {
        config.store.path = val;
    }

    // Export overrides
    if let Some(val) = env_override("KEYPORT_EXPORT_USERS_PER_FILE") {
        config.export.users_per_file = parse_override("KEYPORT_EXPORT_USERS_PER_FILE", &val)?;
    }
    if let Some(val) = env_override("KEYPORT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = env_override("KEYPORT_EXPORT_REALM") {
        config.export.realm = Some(val).filter(|v| !v.is_empty());
    }
    if let Some(val) = env_override("KEYPORT_EXPORT_CONTINUE_ON_ERROR") {
        config.export.continue_on_error =
            parse_override("KEYPORT_EXPORT_CONTINUE_ON_ERROR", &val)?;
    }
    if let Some(val) = env_override("KEYPORT_EXPORT_PRETTY") {
        config.export.pretty = parse_override("KEYPORT_EXPORT_PRETTY", &val)?;
    }
    if let Some(val) = env_override("KEYPORT_EXPORT_DRY_RUN") {
        config.export.dry_run = parse_override("KEYPORT_EXPORT_DRY_RUN", &val)?;
    }

    // Verification overrides
    if let Some(val) = env_override("KEYPORT_VERIFICATION_ENABLE_VERIFICATION") {
        config.verification.enable_verification =
            parse_override("KEYPORT_VERIFICATION_ENABLE_VERIFICATION", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_override("KEYPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("KEYPORT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("KEYPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("KEYPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
