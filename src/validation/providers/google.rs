//! Google Address Validation provider implementation
//!
//! Calls the Address Validation API for a free-form US address and returns
//! the parsed result. The API key travels as a `key` query parameter and must
//! never appear in logs or error bodies; error text is sanitized at the
//! response boundary.

use crate::validation::provider::{AddressValidator, ProviderError, ValidationResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Google Address Validation provider configuration
#[derive(Debug, Clone)]
pub struct GoogleValidationConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Optional Referer header, for referer-restricted API keys
    pub referer: Option<String>,
}

impl Default for GoogleValidationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://addressvalidation.googleapis.com/v1:validateAddress".to_string(),
            timeout: Duration::from_secs(5),
            referer: None,
        }
    }
}

/// Google Address Validation client
pub struct GoogleAddressValidator {
    config: GoogleValidationConfig,
    client: Client,
}

impl GoogleAddressValidator {
    /// Create a new validation client
    pub fn new(config: GoogleValidationConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Google Maps API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl AddressValidator for GoogleAddressValidator {
    fn name(&self) -> &str {
        "google"
    }

    async fn validate(&self, address: &str) -> Result<ValidationResult, ProviderError> {
        let request_body = ValidateAddressRequest {
            address: RequestAddress {
                region_code: "US".to_string(),
                address_lines: vec![address.to_string()],
            },
        };

        let mut request = self
            .client
            .post(&self.config.base_url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request_body);

        if let Some(referer) = &self.config.referer {
            request = request.header("Referer", referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "address validation returned {status}: {error_text}"
            )));
        }

        let envelope: ValidateAddressResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        envelope.result.ok_or(ProviderError::EmptyResult)
    }
}

#[derive(Debug, Serialize)]
struct ValidateAddressRequest {
    address: RequestAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestAddress {
    region_code: String,
    address_lines: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ValidateAddressResponse {
    result: Option<ValidationResult>,
}
