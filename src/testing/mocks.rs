//! Mock implementations for testing
//!
//! Provides mock AddressValidator and SuggestionProvider implementations to
//! enable testing the request path without calling Google.

use crate::validation::provider::{
    AddressValidator, ProviderError, SuggestionProvider, ValidationResult,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock address validator returning a canned result or error
#[derive(Debug, Default)]
pub struct MockValidator {
    result: ValidationResult,
    error: Option<ProviderError>,
    pub received_addresses: Arc<Mutex<Vec<String>>>,
}

impl MockValidator {
    pub fn returning(result: ValidationResult) -> Self {
        Self {
            result,
            ..Default::default()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub async fn get_received_addresses(&self) -> Vec<String> {
        self.received_addresses.lock().await.clone()
    }
}

#[async_trait]
impl AddressValidator for MockValidator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn validate(&self, address: &str) -> Result<ValidationResult, ProviderError> {
        self.received_addresses
            .lock()
            .await
            .push(address.to_string());

        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.result.clone()),
        }
    }
}

/// Mock suggestion provider with canned suggestions and call recording
#[derive(Debug, Default)]
pub struct MockSuggestions {
    suggestions: Vec<String>,
    pub received_inputs: Arc<Mutex<Vec<String>>>,
}

impl MockSuggestions {
    pub fn returning<S: Into<String>>(suggestions: Vec<S>) -> Self {
        Self {
            suggestions: suggestions.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn get_received_inputs(&self) -> Vec<String> {
        self.received_inputs.lock().await.clone()
    }
}

#[async_trait]
impl SuggestionProvider for MockSuggestions {
    fn name(&self) -> &str {
        "mock-suggestions"
    }

    async fn suggest(&self, input: &str) -> Vec<String> {
        self.received_inputs.lock().await.push(input.to_string());
        self.suggestions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_validator_records_addresses() {
        let validator = MockValidator::returning(ValidationResult::default());
        validator.validate("123 Main St").await.unwrap();

        assert_eq!(
            validator.get_received_addresses().await,
            vec!["123 Main St".to_string()]
        );
    }

    #[tokio::test]
    async fn test_mock_validator_failure() {
        let validator = MockValidator::failing(ProviderError::EmptyResult);
        assert!(matches!(
            validator.validate("x").await,
            Err(ProviderError::EmptyResult)
        ));
    }

    #[tokio::test]
    async fn test_mock_suggestions_returns_canned_list() {
        let suggestions = MockSuggestions::returning(vec!["123 Main St, Springfield, IL"]);
        assert_eq!(
            suggestions.suggest("123 Main").await,
            vec!["123 Main St, Springfield, IL".to_string()]
        );
        assert_eq!(
            suggestions.get_received_inputs().await,
            vec!["123 Main".to_string()]
        );
    }
}
