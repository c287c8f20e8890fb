//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ledger_client_requests_total` (counter): requests by endpoint, outcome
//! - `ledger_client_request_duration_seconds` (histogram): latency by endpoint
//! - `ledger_client_submissions_total` (counter): workflow outcomes
//! - `ledger_client_sync_ticks_total` (counter): refreshes by resource, outcome

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!(
        "ledger_client_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_request_duration(endpoint: &'static str, elapsed: Duration) {
    metrics::histogram!("ledger_client_request_duration_seconds", "endpoint" => endpoint)
        .record(elapsed.as_secs_f64());
}

pub fn record_submission(outcome: &'static str) {
    metrics::counter!("ledger_client_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_sync_tick(resource: &'static str, outcome: &'static str) {
    metrics::counter!(
        "ledger_client_sync_ticks_total",
        "resource" => resource,
        "outcome" => outcome
    )
    .increment(1);
}
