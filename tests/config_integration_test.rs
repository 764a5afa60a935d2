//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use keyport::config::load_config;
use keyport::core::export::UserPaging;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("KEYPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("KEYPORT_APPLICATION_DRY_RUN");
    std::env::remove_var("KEYPORT_STORE_PATH");
    std::env::remove_var("KEYPORT_EXPORT_USERS_PER_FILE");
    std::env::remove_var("KEYPORT_EXPORT_REALM");
    std::env::remove_var("KEYPORT_EXPORT_CONTINUE_ON_ERROR");
    std::env::remove_var("KEYPORT_LOGGING_LOCAL_ROTATION");
    std::env::remove_var("TEST_KEYPORT_DATA_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[store]
path = "/var/lib/keyport/realms.json"

[export]
users_per_file = 100
output_dir = "/tmp/keyport-export"
realm = "acme"
continue_on_error = true
pretty = true

[verification]
enable_verification = true

[logging]
local_enabled = true
local_path = "/tmp/keyport-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.is_dry_run());
    assert_eq!(config.store.path, "/var/lib/keyport/realms.json");
    assert_eq!(config.export.users_per_file, 100);
    assert_eq!(config.export.output_dir, "/tmp/keyport-export");
    assert_eq!(config.export.realm.as_deref(), Some("acme"));
    assert!(config.export.continue_on_error);
    assert!(config.export.pretty);
    assert!(config.verification.enable_verification);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[store]
path = "realms.json"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.is_dry_run());
    assert_eq!(config.export.users_per_file, 50);
    assert_eq!(config.export.output_dir, "export");
    assert!(config.export.realm.is_none());
    assert!(!config.export.continue_on_error);
    assert_eq!(config.export.paging(), UserPaging::default());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_missing_store_section_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[export]
users_per_file = 10
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("store"));
}

#[test]
fn test_missing_file_is_configuration_error() {
    let err = load_config("/nonexistent/keyport.toml").unwrap_err();
    assert!(matches!(err, keyport::domain::KeyportError::Configuration(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_KEYPORT_DATA_DIR", "/srv/identity");

    let file = write_config(
        r#"
[store]
path = "${TEST_KEYPORT_DATA_DIR}/realms.json"
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();

    assert_eq!(result.unwrap().store.path, "/srv/identity/realms.json");
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[store]
path = "${TEST_KEYPORT_DATA_DIR}/realms.json"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_KEYPORT_DATA_DIR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("KEYPORT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("KEYPORT_STORE_PATH", "/override/realms.json");
    std::env::set_var("KEYPORT_EXPORT_USERS_PER_FILE", "-1");
    std::env::set_var("KEYPORT_EXPORT_REALM", "master");
    std::env::set_var("KEYPORT_EXPORT_CONTINUE_ON_ERROR", "true");

    let file = write_config(
        r#"
[store]
path = "realms.json"

[export]
users_per_file = 100
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();
    let config = result.unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.store.path, "/override/realms.json");
    assert_eq!(config.export.users_per_file, -1);
    assert!(config.export.paging().users_into_same_file());
    assert_eq!(config.export.realm.as_deref(), Some("master"));
    assert!(config.export.continue_on_error);
}

#[test]
fn test_unparseable_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("KEYPORT_EXPORT_USERS_PER_FILE", "lots");

    let file = write_config(
        r#"
[store]
path = "realms.json"
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("KEYPORT_EXPORT_USERS_PER_FILE"));
}

#[test]
fn test_override_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("KEYPORT_LOGGING_LOCAL_ROTATION", "size");

    let file = write_config(
        r#"
[store]
path = "realms.json"
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("local_rotation"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        (
            "[application]\nlog_level = \"verbose\"\n[store]\npath = \"r.json\"\n",
            "log_level",
        ),
        ("[store]\npath = \"\"\n", "store.path"),
        (
            "[store]\npath = \"r.json\"\n[export]\noutput_dir = \" \"\n",
            "output_dir",
        ),
        (
            "[store]\npath = \"r.json\"\n[export]\nrealm = \"../etc\"\n",
            "export.realm",
        ),
    ];

    for (contents, expected) in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{expected}' in '{err}'"
        );
    }
}
