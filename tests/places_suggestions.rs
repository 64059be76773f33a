//! Integration tests for the Places Autocomplete suggestion client
//!
//! The collaborator contract is fail-open: every failure mode must collapse
//! to an empty suggestion list, never an error.

use addressd::validation::provider::SuggestionProvider;
use addressd::validation::providers::places::{GooglePlacesSuggestions, PlacesConfig};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base: &str) -> PlacesConfig {
    PlacesConfig {
        api_key: "test-api-key".to_string(),
        base_url: format!("{base}/maps/api/place/autocomplete/json"),
        timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn test_suggest_maps_predictions_to_descriptions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .and(query_param("input", "1600 Amphitheatre"))
        .and(query_param("types", "address"))
        .and(query_param("components", "country:us"))
        .and(query_param("key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [
                {
                    "description": "1600 Amphitheatre Parkway, Mountain View, CA, USA",
                    "place_id": "place-1"
                },
                {
                    "description": "1600 Amphitheatre Pkwy, Mountain View, CA, USA",
                    "place_id": "place-2"
                }
            ],
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    let provider = GooglePlacesSuggestions::new(test_config(&mock_server.uri()));
    let suggestions = provider.suggest("1600 Amphitheatre").await;

    assert_eq!(
        suggestions,
        vec![
            "1600 Amphitheatre Parkway, Mountain View, CA, USA".to_string(),
            "1600 Amphitheatre Pkwy, Mountain View, CA, USA".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_suggest_falls_back_to_main_text_and_drops_incomplete_predictions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [
                {
                    "structured_formatting": { "main_text": "500 W Madison St" },
                    "place_id": "place-1"
                },
                { "description": "No place id here" },
                { "place_id": "place-3" },
                { "description": "", "place_id": "place-4" }
            ],
            "status": "OK"
        })))
        .mount(&mock_server)
        .await;

    let provider = GooglePlacesSuggestions::new(test_config(&mock_server.uri()));
    let suggestions = provider.suggest("500 W Madison").await;

    assert_eq!(suggestions, vec!["500 W Madison St".to_string()]);
}

#[tokio::test]
async fn test_suggest_fails_open_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let provider = GooglePlacesSuggestions::new(test_config(&mock_server.uri()));
    assert!(provider.suggest("anything").await.is_empty());
}

#[tokio::test]
async fn test_suggest_fails_open_on_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = GooglePlacesSuggestions::new(test_config(&mock_server.uri()));
    assert!(provider.suggest("anything").await.is_empty());
}

#[tokio::test]
async fn test_suggest_fails_open_on_connection_failure() {
    let provider = GooglePlacesSuggestions::new(PlacesConfig {
        api_key: "test-api-key".to_string(),
        base_url: "http://127.0.0.1:1/maps/api/place/autocomplete/json".to_string(),
        timeout: Duration::from_secs(1),
    });

    assert!(provider.suggest("anything").await.is_empty());
}

#[tokio::test]
async fn test_suggest_handles_empty_prediction_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/autocomplete/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [],
            "status": "ZERO_RESULTS"
        })))
        .mount(&mock_server)
        .await;

    let provider = GooglePlacesSuggestions::new(test_config(&mock_server.uri()));
    assert!(provider.suggest("nowhere at all").await.is_empty());
}
