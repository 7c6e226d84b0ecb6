//! Metrics collection and exposition.
//!
//! # Metrics
//! - `netmon_probe_latency_ms` (histogram): successful connect latency
//! - `netmon_probe_failures_total` (counter): failed probes
//! - `netmon_target_connected` (gauge): 1=connected, 0=unreachable
//! - `netmon_faults_total` (counter): recorded faults by phase
//!
//! These describe the monitor process itself; the time series of record
//! goes to the metrics sink.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

use crate::monitor::FaultPhase;
use crate::probe::{ProbeOutcome, Target};

/// Install the Prometheus recorder and scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

pub fn record_probe(target: &Target, outcome: &ProbeOutcome) {
    let host = target.host.clone();
    let port = target.port.to_string();

    match outcome {
        ProbeOutcome::Success { latency_ms } => {
            histogram!("netmon_probe_latency_ms", "host" => host.clone(), "port" => port.clone())
                .record(*latency_ms);
            gauge!("netmon_target_connected", "host" => host, "port" => port).set(1.0);
        }
        ProbeOutcome::Failure(_) => {
            counter!("netmon_probe_failures_total", "host" => host.clone(), "port" => port.clone())
                .increment(1);
            gauge!("netmon_target_connected", "host" => host, "port" => port).set(0.0);
        }
    }
}

pub fn record_fault(phase: FaultPhase) {
    counter!("netmon_faults_total", "phase" => phase.as_str()).increment(1);
}
