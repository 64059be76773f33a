//! HTTP API surface
//!
//! Exposes POST /validate-address plus the /health and /metrics probes.
//! Request handling is thin plumbing around the two pure domain components:
//! rate limit, API-key gate, body validation, one upstream call, then
//! standardize + assess and response assembly. /health and /metrics stay open
//! so orchestration probes work without credentials.

pub mod rate_limit;

use crate::config::AppConfig;
use crate::deliverability::{assess_deliverability, DeliverabilityAssessment, DeliverabilityIssue};
use crate::error::ServiceError;
use crate::observability::metrics::metrics;
use crate::standardize::{standardize_address, StandardizedAddress};
use crate::{request_span, upstream_span};
use crate::validation::provider::{AddressValidator, SuggestionProvider};
use bytes::Bytes;
use rate_limit::RateLimiter;
use serde::Serialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, Instrument};
use uuid::Uuid;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::Filter;

/// Issue kinds that make an address worth suggesting alternatives for
const SUGGESTION_TRIGGERS: &[DeliverabilityIssue] = &[
    DeliverabilityIssue::InsufficientAddress,
    DeliverabilityIssue::UnconfirmedComponents,
    DeliverabilityIssue::DpvNotConfirmed,
];

/// Response payload for POST /validate-address (200 and 422)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAddressResponse {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    pub is_deliverable: bool,
    pub standardized: StandardizedAddress,
    pub metadata: ResponseMetadata,
    pub issues: Vec<DeliverabilityIssue>,
    pub suggestions: Vec<String>,
}

/// Diagnostic fields surfaced regardless of deliverability
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_plus4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpv_confirmation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpv_footnotes: Option<String>,
    pub missing_secondary: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

struct RequestContext {
    validator: Arc<dyn AddressValidator>,
    suggestions: Arc<dyn SuggestionProvider>,
    api_key: Option<String>,
    limiter: Option<RateLimiter>,
}

/// HTTP API server
pub struct ApiServer {
    port: u16,
    ctx: Arc<RequestContext>,
}

impl ApiServer {
    /// Build the server from configuration and injected providers.
    ///
    /// The inbound API key is resolved from the environment here, once; an
    /// absent key disables the gate.
    pub fn new(
        config: &AppConfig,
        validator: Arc<dyn AddressValidator>,
        suggestions: Arc<dyn SuggestionProvider>,
    ) -> Self {
        let api_key = config.get_inbound_api_key();
        if api_key.is_none() {
            tracing::warn!(
                "{} is not set; API key auth is disabled (all requests allowed)",
                config.server.api_key_env
            );
        }

        let rate_limit = &config.server.rate_limit;
        let limiter = rate_limit.enabled.then(|| {
            RateLimiter::new(
                rate_limit.max_requests,
                Duration::from_secs(rate_limit.window_secs),
            )
        });

        Self {
            port: config.server.port,
            ctx: Arc::new(RequestContext {
                validator,
                suggestions,
                api_key,
                limiter,
            }),
        }
    }

    /// Assemble the route tree. Public so tests can drive it through
    /// `warp::test` without binding a socket.
    pub fn routes(&self) -> BoxedFilter<(Response,)> {
        let ctx = self.ctx.clone();
        let validate_route = warp::path("validate-address")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::addr::remote())
            .and(warp::header::optional::<String>("x-api-key"))
            .and(warp::body::bytes())
            .and_then(move |remote, api_key, body| {
                let ctx = ctx.clone();
                async move {
                    Ok::<_, Infallible>(handle_validate(ctx, remote, api_key, body).await)
                }
            });

        // /health is intentionally left open for basic uptime checks
        let health_route = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::json(&HealthResponse { status: "ok" }).into_response());

        let metrics_route = warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::json(&metrics().snapshot()).into_response());

        validate_route
            .or(health_route)
            .unify()
            .or(metrics_route)
            .unify()
            .boxed()
    }

    /// Bind and serve until the process is shut down
    pub async fn start(self) {
        let port = self.port;
        info!("Starting API server on port {port}");
        warp::serve(self.routes()).run(([0, 0, 0, 0], port)).await;
    }
}

async fn handle_validate(
    ctx: Arc<RequestContext>,
    remote: Option<SocketAddr>,
    provided_api_key: Option<String>,
    body: Bytes,
) -> Response {
    metrics().request_received();
    let request_id = Uuid::new_v4();
    let span = request_span!(request_id = %request_id);

    async move {
        if let Some(limiter) = &ctx.limiter {
            if let Err(retry_after_secs) = limiter.check(remote.map(|addr| addr.ip())) {
                metrics().request_rate_limited();
                return error_response(&ServiceError::RateLimited { retry_after_secs });
            }
        }

        if let Some(expected) = &ctx.api_key {
            if provided_api_key.as_deref() != Some(expected.as_str()) {
                metrics().request_unauthorized();
                return error_response(&ServiceError::unauthorized(
                    "invalid or missing X-API-Key",
                ));
            }
        }

        let address = match std::str::from_utf8(&body) {
            Ok(text) => text.trim().to_string(),
            Err(_) => String::new(),
        };
        if address.is_empty() {
            metrics().request_invalid();
            return error_response(&ServiceError::invalid_request("address is required"));
        }

        let started = Instant::now();
        let result = ctx
            .validator
            .validate(&address)
            .instrument(upstream_span!(provider = ctx.validator.name()))
            .await;
        metrics().record_upstream_latency(started.elapsed().as_millis() as u64);

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                metrics().upstream_error();
                error!("Address validation failed: {e}");
                return error_response(&ServiceError::from(e));
            }
        };

        let standardized = standardize_address(&result);
        let deliverability = assess_deliverability(&result);
        metrics().validation_completed(deliverability.is_deliverable);
        debug!(
            is_deliverable = deliverability.is_deliverable,
            issues = ?deliverability.issues,
            "assessed address"
        );

        let suggestions = if should_fetch_suggestions(&deliverability) {
            metrics().suggestion_lookup();
            ctx.suggestions.suggest(&address).await
        } else {
            Vec::new()
        };

        let status = if deliverability.is_deliverable {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };

        let formatted_address = result
            .address
            .as_ref()
            .and_then(|a| a.formatted_address.clone());

        let payload = ValidateAddressResponse {
            input: address,
            formatted_address,
            is_deliverable: deliverability.is_deliverable,
            metadata: ResponseMetadata {
                zip_plus4: standardized.zip_plus4.clone(),
                dpv_confirmation: deliverability.dpv_confirmation.clone(),
                dpv_footnotes: deliverability.dpv_footnotes.clone(),
                missing_secondary: deliverability.missing_secondary,
            },
            standardized,
            issues: deliverability.issues,
            suggestions,
        };

        warp::reply::with_status(warp::reply::json(&payload), status).into_response()
    }
    .instrument(span)
    .await
}

/// Fetch suggestions only for issue kinds a reformulated input could fix
fn should_fetch_suggestions(assessment: &DeliverabilityAssessment) -> bool {
    !assessment.is_deliverable
        && assessment
            .issues
            .iter()
            .any(|issue| SUGGESTION_TRIGGERS.contains(issue))
}

fn error_response(error: &ServiceError) -> Response {
    let reply = warp::reply::with_status(warp::reply::json(&error.to_body()), error.status());

    if let ServiceError::RateLimited { retry_after_secs } = error {
        warp::reply::with_header(reply, "retry-after", retry_after_secs.to_string())
            .into_response()
    } else {
        reply.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(
        is_deliverable: bool,
        issues: Vec<DeliverabilityIssue>,
    ) -> DeliverabilityAssessment {
        DeliverabilityAssessment {
            is_deliverable,
            issues,
            missing_secondary: false,
            dpv_confirmation: None,
            dpv_footnotes: None,
        }
    }

    #[test]
    fn test_suggestions_triggered_by_unconfirmed_components() {
        assert!(should_fetch_suggestions(&assessment(
            false,
            vec![DeliverabilityIssue::UnconfirmedComponents],
        )));
    }

    #[test]
    fn test_suggestions_triggered_by_dpv_not_confirmed() {
        assert!(should_fetch_suggestions(&assessment(
            false,
            vec![DeliverabilityIssue::DpvNotConfirmed],
        )));
    }

    #[test]
    fn test_suggestions_not_triggered_for_deliverable_result() {
        assert!(!should_fetch_suggestions(&assessment(true, Vec::new())));
    }

    #[test]
    fn test_suggestions_not_triggered_by_non_us_alone() {
        assert!(!should_fetch_suggestions(&assessment(
            false,
            vec![DeliverabilityIssue::NonUsAddress],
        )));
    }

    #[test]
    fn test_rate_limited_response_carries_retry_after_header() {
        let response = error_response(&ServiceError::RateLimited {
            retry_after_secs: 42,
        });

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after = response.headers().get("retry-after").unwrap();
        assert_eq!(retry_after.to_str().unwrap(), "42");
    }

    #[test]
    fn test_response_payload_serializes_camel_case() {
        let payload = ValidateAddressResponse {
            input: "x".to_string(),
            formatted_address: None,
            is_deliverable: false,
            standardized: StandardizedAddress::default(),
            metadata: ResponseMetadata {
                zip_plus4: Some("12345-6789".to_string()),
                dpv_confirmation: Some("N".to_string()),
                dpv_footnotes: None,
                missing_secondary: false,
            },
            issues: vec![DeliverabilityIssue::DpvNotConfirmed],
            suggestions: Vec::new(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["isDeliverable"], serde_json::json!(false));
        assert_eq!(json["metadata"]["zipPlus4"], serde_json::json!("12345-6789"));
        assert_eq!(json["issues"], serde_json::json!(["DPV_NOT_CONFIRMED"]));
    }
}
