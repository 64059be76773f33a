//! Upstream validation provider abstraction and trait definitions
//!
//! This module defines the core traits and types for address-validation
//! provider interactions, enabling multiple provider backends with a unified
//! interface. Every field of the upstream result is optional: providers omit
//! whole subtrees for sparse input, and absence is ordinary data here, not an
//! error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parsed result of a single upstream validation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationResult {
    pub verdict: Option<Verdict>,
    pub address: Option<Address>,
    pub usps_data: Option<UspsData>,
    pub metadata: Option<AddressMetadata>,
}

/// Provider's own completeness/confidence assessment, independent of DPV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Verdict {
    pub input_granularity: Option<String>,
    pub validation_granularity: Option<String>,
    pub geocode_granularity: Option<String>,
    pub address_complete: Option<bool>,
    pub has_unconfirmed_components: Option<bool>,
    pub has_inferred_components: Option<bool>,
    pub has_replaced_components: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub formatted_address: Option<String>,
    pub postal_address: Option<PostalAddress>,
    pub address_components: Option<Vec<AddressComponent>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostalAddress {
    pub region_code: Option<String>,
    pub postal_code: Option<String>,
    pub administrative_area: Option<String>,
    pub locality: Option<String>,
    pub address_lines: Option<Vec<String>>,
}

/// One structured component of the parsed address (e.g. `route`,
/// `street_number`), in provider order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressComponent {
    pub component_name: Option<ComponentName>,
    pub component_type: Option<String>,
    pub confirmation_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentName {
    pub text: Option<String>,
}

/// USPS-specific data attached by the provider for US addresses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UspsData {
    pub dpv_confirmation: Option<String>,
    pub dpv_footnotes: Option<String>,
    pub dpv_cmra: Option<bool>,
    pub dpv_vacant: Option<bool>,
    pub dpv_no_stat: Option<bool>,
    pub post_office_city: Option<String>,
    pub post_office_state: Option<String>,
    pub standard_carrier_route: Option<String>,
    pub address_record_type: Option<String>,
    pub default_address: Option<bool>,
    pub vacant: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressMetadata {
    pub business: Option<bool>,
    pub po_box: Option<bool>,
    pub residential: Option<bool>,
}

/// Errors from upstream validation providers
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("provider is not configured: {0}")]
    NotConfigured(String),

    #[error("network error contacting provider: {0}")]
    Network(String),

    #[error("provider returned an error: {0}")]
    Api(String),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("empty result from provider")]
    EmptyResult,
}

/// Address validation provider trait for dependency injection and testing
#[async_trait]
pub trait AddressValidator: Send + Sync {
    /// Get the provider name (e.g. "google")
    fn name(&self) -> &str;

    /// Validate a free-form address and return the parsed upstream result
    async fn validate(&self, address: &str) -> Result<ValidationResult, ProviderError>;
}

/// Address suggestion provider trait
///
/// Suggestion lookup is best-effort: implementations must fail open and
/// return an empty vec on any error rather than surfacing it.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Get the provider name (e.g. "google-places")
    fn name(&self) -> &str;

    /// Fetch human-readable address suggestions for the given input
    async fn suggest(&self, input: &str) -> Vec<String>;
}
