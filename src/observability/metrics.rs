//! Metrics collection and exposition.
//!
//! # Metrics
//! - `validator_health_endpoint_height` (gauge): last height per endpoint
//! - `validator_health_fetch_failures_total` (counter): sentinel readings per endpoint
//! - `validator_health_evaluations_total` (counter): verdicts by outcome
//! - `validator_health_blocks_behind` (gauge): lag of the last healthy verdict
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::HeightReading;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_height(reading: &HeightReading) {
    metrics::gauge!("validator_health_endpoint_height", "endpoint" => reading.name.clone())
        .set(reading.height as f64);
    if reading.is_sentinel() {
        metrics::counter!("validator_health_fetch_failures_total", "endpoint" => reading.name.clone())
            .increment(1);
    }
}

pub fn record_evaluation(outcome: &'static str) {
    metrics::counter!("validator_health_evaluations_total", "outcome" => outcome).increment(1);
}

pub fn record_blocks_behind(behind: u64) {
    metrics::gauge!("validator_health_blocks_behind").set(behind as f64);
}
