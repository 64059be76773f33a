//! Observability: structured logging and metrics
//!
//! Logging configuration mirrors production conventions (JSON by default,
//! env-variable controlled); metrics are a process-global collector exposed
//! on the /metrics endpoint.

pub mod logging;
pub mod metrics;

// Re-export for convenience
pub use logging::{init_default_logging, init_logging, LogFormat};
pub use metrics::{metrics, MetricsCollector, MetricsSnapshot};

// Span macros for structured logging
pub use logging::{request_span, upstream_span};
