//! Service configuration
//!
//! TOML-backed configuration with environment-variable indirection for
//! secrets: config files name the variable holding a key (`*_env` fields),
//! never the key itself. Every field has a default so the service can also
//! run file-less, configured entirely from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub google: GoogleSection,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    /// Port the API listens on
    pub port: u16,
    /// Environment variable holding the inbound X-API-Key value; the gate is
    /// disabled when the variable is unset
    pub api_key_env: String,
    pub rate_limit: RateLimitSection,
}

/// Per-client fixed-window rate limiting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateLimitSection {
    pub enabled: bool,
    /// Requests allowed per window per client IP
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

/// Google API endpoints and credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoogleSection {
    /// Environment variable holding the Google Maps API key
    pub api_key_env: String,
    /// Address Validation endpoint
    pub validation_url: String,
    /// Places Autocomplete endpoint used for suggestions
    pub places_url: String,
    pub validation_timeout_ms: u64,
    pub suggestion_timeout_ms: u64,
    /// Optional Referer header sent on validation calls, for key restrictions
    pub referer: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: 3000,
            api_key_env: "ADDRESSD_API_KEY".to_string(),
            rate_limit: RateLimitSection::default(),
        }
    }
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            enabled: false,
            max_requests: 60,
            window_secs: 60,
        }
    }
}

impl Default for GoogleSection {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_MAPS_API_KEY".to_string(),
            validation_url: "https://addressvalidation.googleapis.com/v1:validateAddress"
                .to_string(),
            places_url: "https://maps.googleapis.com/maps/api/place/autocomplete/json".to_string(),
            validation_timeout_ms: 5000,
            suggestion_timeout_ms: 3000,
            referer: None,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.port must be non-zero".to_string(),
            ));
        }

        for (name, value) in [
            ("google.validation_url", &self.google.validation_url),
            ("google.places_url", &self.google.places_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ConfigError::InvalidConfig(format!("{name} is not a URL: {e}")))?;
        }

        let rate_limit = &self.server.rate_limit;
        if rate_limit.enabled && (rate_limit.max_requests == 0 || rate_limit.window_secs == 0) {
            return Err(ConfigError::InvalidConfig(
                "rate_limit.max_requests and window_secs must be non-zero when enabled"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Inbound API key from the environment, None when the gate is disabled
    pub fn get_inbound_api_key(&self) -> Option<String> {
        std::env::var(&self.server.api_key_env).ok()
    }

    /// Google API key from the environment; required to start
    pub fn get_google_api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.google.api_key_env)
            .map_err(|_| ConfigError::EnvVarNotFound(self.google.api_key_env.clone()))
    }

    pub fn validation_timeout(&self) -> Duration {
        Duration::from_millis(self.google.validation_timeout_ms)
    }

    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_millis(self.google.suggestion_timeout_ms)
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[server]
port = 3000

[server.rate_limit]
enabled = true
max_requests = 5
window_secs = 60

[google]
api_key_env = "TEST_GOOGLE_KEY"
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}
