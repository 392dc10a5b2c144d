//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, path, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_upstream_failures_total` (counter): failed upstream calls
//!
//! # Design Decisions
//! - Prometheus exporter on a side listener, separate from the API port
//! - Low-overhead updates (atomic operations behind the metrics macros)

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Axum middleware recording one counter increment and one latency sample
/// per request.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    record_request(&method, &path, response.status().as_u16(), start);
    response
}

/// Record a completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("gateway_requests_total", &labels).increment(1);
    metrics::histogram!("gateway_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed upstream call.
pub fn record_upstream_failure() {
    metrics::counter!("gateway_upstream_failures_total").increment(1);
}
