//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request metrics (count, latency)
//! - Expose Prometheus-compatible metrics endpoint
//! - Track per-operation and unmatched traffic
//!
//! # Metrics
//! - `journeys_requests_total` (counter): total requests by operation, method, status
//! - `journeys_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Unmatched requests are labelled `operation="unmatched"` to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Operation label for requests that matched no route.
pub const UNMATCHED: &str = "unmatched";

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(operation: &str, method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "journeys_requests_total",
        "operation" => operation.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "journeys_request_duration_seconds",
        "operation" => operation.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
