//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): invocations by method, route, status
//! - `router_request_duration_seconds` (histogram): dispatch latency
//!
//! Without an installed recorder every call is a no-op, which is the normal
//! state inside the Lambda runtime. The local server can expose a
//! Prometheus scrape endpoint.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with an HTTP scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one dispatched invocation.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("router_requests_total", &labels).increment(1);
    metrics::histogram!("router_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_recorder() {
        record_request("GET", 200, "GET /hello", Instant::now());
    }
}
