//! Configuration loading and validation tests
//!
//! Tests focus on BEHAVIOR of configuration loading, validation, and error
//! handling. We test observable outcomes, not implementation details of TOML
//! parsing.

use addressd::config::{AppConfig, ConfigError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_loads_successfully_from_valid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[server]
port = 8080
api_key_env = "MY_SERVICE_KEY"

[server.rate_limit]
enabled = true
max_requests = 30
window_secs = 60

[google]
api_key_env = "MY_GOOGLE_KEY"
validation_timeout_ms = 2500
"#
    )
    .unwrap();

    let config = AppConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.api_key_env, "MY_SERVICE_KEY");
    assert!(config.server.rate_limit.enabled);
    assert_eq!(config.server.rate_limit.max_requests, 30);
    assert_eq!(config.google.api_key_env, "MY_GOOGLE_KEY");
    assert_eq!(config.google.validation_timeout_ms, 2500);
}

#[test]
fn test_partial_config_fills_in_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[server]
port = 9090
"#
    )
    .unwrap();

    let config = AppConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.server.port, 9090);
    assert!(!config.server.rate_limit.enabled);
    assert_eq!(config.google.api_key_env, "GOOGLE_MAPS_API_KEY");
    assert!(config
        .google
        .validation_url
        .starts_with("https://addressvalidation.googleapis.com"));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let result = AppConfig::load_from_file(std::path::Path::new("/nonexistent/addressd.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "this is not toml [[[").unwrap();

    let result = AppConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_invalid_values_fail_validation_on_load() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[google]
validation_url = "not a url"
"#
    )
    .unwrap();

    let result = AppConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_enabled_rate_limit_with_zero_max_fails_on_load() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[server.rate_limit]
enabled = true
max_requests = 0
"#
    )
    .unwrap();

    let result = AppConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}
