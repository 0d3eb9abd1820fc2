//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): inbound requests by method, path, status
//! - `upstream_requests_total` (counter): FRED calls by series
//! - `upstream_failures_total` (counter): collapsed FRED failures by series
//! - `cache_hits_total` / `cache_misses_total` (counter): observation cache

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_http_request(method: &str, path: &str, status: u16) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
}

pub fn record_upstream_request(series_id: &str) {
    metrics::counter!("upstream_requests_total", "series" => series_id.to_string()).increment(1);
}

pub fn record_upstream_failure(series_id: &str) {
    metrics::counter!("upstream_failures_total", "series" => series_id.to_string()).increment(1);
}

pub fn record_cache_hit() {
    metrics::counter!("cache_hits_total").increment(1);
}

pub fn record_cache_miss() {
    metrics::counter!("cache_misses_total").increment(1);
}
