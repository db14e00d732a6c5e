//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sensor_ledger_requests_total` (counter): ingress requests by status
//! - `sensor_ledger_uploads_total` (counter): content store uploads by outcome
//! - `sensor_ledger_ledger_writes_total` (counter): `storeData` calls by outcome
//! - `sensor_ledger_pipeline_duration_seconds` (histogram): upload + ledger latency
//! - `sensor_ledger_dependency_health` (gauge): 1=reachable, 0=unreachable

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

pub fn record_request(status: u16) {
    ::metrics::counter!("sensor_ledger_requests_total", "status" => status.to_string()).increment(1);
}

pub fn record_upload(success: bool) {
    ::metrics::counter!("sensor_ledger_uploads_total", "outcome" => outcome(success)).increment(1);
}

pub fn record_ledger_write(success: bool) {
    ::metrics::counter!("sensor_ledger_ledger_writes_total", "outcome" => outcome(success)).increment(1);
}

pub fn record_pipeline_duration(start: Instant) {
    ::metrics::histogram!("sensor_ledger_pipeline_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_dependency_health(dependency: &'static str, healthy: bool) {
    ::metrics::gauge!("sensor_ledger_dependency_health", "dependency" => dependency)
        .set(if healthy { 1.0 } else { 0.0 });
}
