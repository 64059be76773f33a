//! Thread-safe metrics collection
//!
//! Atomic counters and a mutex-protected latency buffer tracking request
//! outcomes, deliverability verdicts, and upstream provider behavior. A JSON
//! snapshot is served on GET /metrics.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Global metrics collector instance
pub static METRICS: Lazy<MetricsCollector> = Lazy::new(MetricsCollector::new);

/// Get reference to global metrics collector
pub fn metrics() -> &'static MetricsCollector {
    &METRICS
}

/// Thread-safe metrics collector using atomics and a latency mutex
pub struct MetricsCollector {
    // Request outcomes
    requests_received: AtomicU64,
    requests_invalid: AtomicU64,
    requests_unauthorized: AtomicU64,
    requests_rate_limited: AtomicU64,

    // Verdicts
    validations_deliverable: AtomicU64,
    validations_undeliverable: AtomicU64,

    // Upstream behavior
    upstream_errors: AtomicU64,
    suggestion_lookups: AtomicU64,
    upstream_latency_ms: Mutex<Vec<u64>>,

    uptime_start: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            requests_invalid: AtomicU64::new(0),
            requests_unauthorized: AtomicU64::new(0),
            requests_rate_limited: AtomicU64::new(0),
            validations_deliverable: AtomicU64::new(0),
            validations_undeliverable: AtomicU64::new(0),
            upstream_errors: AtomicU64::new(0),
            suggestion_lookups: AtomicU64::new(0),
            upstream_latency_ms: Mutex::new(Vec::new()),
            uptime_start: AtomicU64::new(current_timestamp()),
        }
    }

    pub fn request_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_invalid(&self) {
        self.requests_invalid.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_unauthorized(&self) {
        self.requests_unauthorized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_rate_limited(&self) {
        self.requests_rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn validation_completed(&self, deliverable: bool) {
        if deliverable {
            self.validations_deliverable.fetch_add(1, Ordering::Relaxed);
        } else {
            self.validations_undeliverable
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn upstream_error(&self) {
        self.upstream_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn suggestion_lookup(&self) {
        self.suggestion_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_latency(&self, millis: u64) {
        if let Ok(mut latencies) = self.upstream_latency_ms.lock() {
            // Keep a bounded sample window
            if latencies.len() >= 1000 {
                latencies.remove(0);
            }
            latencies.push(millis);
        }
    }

    /// Produce a serializable snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let (upstream_latency_avg_ms, upstream_latency_samples) =
            match self.upstream_latency_ms.lock() {
                Ok(latencies) if !latencies.is_empty() => {
                    let sum: u64 = latencies.iter().sum();
                    (Some(sum / latencies.len() as u64), latencies.len())
                }
                _ => (None, 0),
            };

        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            requests_invalid: self.requests_invalid.load(Ordering::Relaxed),
            requests_unauthorized: self.requests_unauthorized.load(Ordering::Relaxed),
            requests_rate_limited: self.requests_rate_limited.load(Ordering::Relaxed),
            validations_deliverable: self.validations_deliverable.load(Ordering::Relaxed),
            validations_undeliverable: self.validations_undeliverable.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
            suggestion_lookups: self.suggestion_lookups.load(Ordering::Relaxed),
            upstream_latency_avg_ms,
            upstream_latency_samples,
            uptime_seconds: current_timestamp()
                .saturating_sub(self.uptime_start.load(Ordering::Relaxed)),
            snapshot_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the collector, serialized on GET /metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_received: u64,
    pub requests_invalid: u64,
    pub requests_unauthorized: u64,
    pub requests_rate_limited: u64,
    pub validations_deliverable: u64,
    pub validations_undeliverable: u64,
    pub upstream_errors: u64,
    pub suggestion_lookups: u64,
    pub upstream_latency_avg_ms: Option<u64>,
    pub upstream_latency_samples: usize,
    pub uptime_seconds: u64,
    pub snapshot_at: String,
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
