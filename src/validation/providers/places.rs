//! Google Places Autocomplete provider implementation
//!
//! Supplies human-readable address suggestions for inputs the validator could
//! not confirm. Suggestion lookup is strictly best-effort: every failure mode
//! (missing key, network error, bad status, undecodable body) collapses to an
//! empty list so it can never block or fail the primary response.

use crate::validation::provider::SuggestionProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Places Autocomplete provider configuration
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://maps.googleapis.com/maps/api/place/autocomplete/json".to_string(),
            timeout: Duration::from_secs(3),
        }
    }
}

/// Google Places Autocomplete client
pub struct GooglePlacesSuggestions {
    config: PlacesConfig,
    client: Client,
}

impl GooglePlacesSuggestions {
    /// Create a new suggestion client. Construction is infallible: a missing
    /// key just disables lookups.
    pub fn new(config: PlacesConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    async fn fetch(&self, input: &str) -> Result<Vec<String>, reqwest::Error> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("input", input),
                ("types", "address"),
                ("components", "country:us"),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: AutocompleteResponse = response.json().await?;

        let suggestions = body
            .predictions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|prediction| {
                let description = prediction.description.or_else(|| {
                    prediction
                        .structured_formatting
                        .and_then(|formatting| formatting.main_text)
                })?;
                let place_id = prediction.place_id?;

                if description.is_empty() || place_id.is_empty() {
                    return None;
                }
                Some(description)
            })
            .collect();

        Ok(suggestions)
    }
}

#[async_trait]
impl SuggestionProvider for GooglePlacesSuggestions {
    fn name(&self) -> &str {
        "google-places"
    }

    async fn suggest(&self, input: &str) -> Vec<String> {
        if self.config.api_key.is_empty() {
            debug!("suggestion lookup skipped: no Places API key configured");
            return Vec::new();
        }
        if input.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch(input).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("suggestion lookup failed, continuing without: {e}");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    predictions: Option<Vec<Prediction>>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: Option<String>,
    place_id: Option<String>,
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: Option<String>,
}
