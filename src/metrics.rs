//! Prometheus metrics for upstream traffic

use std::sync::LazyLock;

use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

use crate::error::{Result, SpreadError};

static UPSTREAM_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "spread_tracker_upstream_requests_total",
        "Upstream REST API requests by endpoint and outcome",
        &["endpoint", "outcome"]
    )
    .expect("static metric definition is valid")
});

/// Outcome label of an upstream request
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Success,
    HttpError,
    TransportError,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::HttpError => "http_error",
            Outcome::TransportError => "transport_error",
        }
    }
}

pub fn record_upstream_request(endpoint: &str, outcome: Outcome) {
    UPSTREAM_REQUESTS
        .with_label_values(&[endpoint, outcome.as_str()])
        .inc();
}

pub fn upstream_request_count(endpoint: &str, outcome: Outcome) -> u64 {
    UPSTREAM_REQUESTS
        .with_label_values(&[endpoint, outcome.as_str()])
        .get()
}

/// Render every registered metric in the Prometheus text format
pub fn render() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| SpreadError::MetricsError(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| SpreadError::MetricsError(format!("Metrics are not UTF-8: {}", e)))
}
