//! The monitor loop and its lifecycle.
//!
//! # States
//! ```text
//! Idle ──run()──▶ Running ──stop()──▶ Stopping ──(top of next iteration)──▶ Stopped
//! ```
//!
//! # Cycle
//! ```text
//! stop flag set? → exit
//! probe → state update → emit point → record faults → sleep(interval) or stop
//! ```

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use tokio::time;

use crate::config::validation::validate_config;
use crate::config::{ConfigError, MonitorConfig};
use crate::lifecycle::StopSignal;
use crate::monitor::faults::{FaultChannel, FaultRecord, MonitorError};
use crate::monitor::state::{ConnectivitySnapshot, ConnectivityTracker, StatusReport};
use crate::observability::metrics;
use crate::probe::{ProbeOutcome, Prober, Target, TcpProber};
use crate::sink::{InfluxSink, MetricsEmitter, MetricsSink};

/// Lifecycle phase of a monitor.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Idle = 0,
    Running = 1,
    Stopping = 2,
    Stopped = 3,
}

impl From<u8> for MonitorPhase {
    fn from(val: u8) -> Self {
        match val {
            1 => MonitorPhase::Running,
            2 => MonitorPhase::Stopping,
            3 => MonitorPhase::Stopped,
            _ => MonitorPhase::Idle,
        }
    }
}

/// Cloneable view onto a running monitor for query and control.
///
/// This is what the HTTP layer holds; it never drives the loop.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    target: Arc<Target>,
    state: Arc<ConnectivityTracker>,
    faults: Arc<FaultChannel>,
    stop: StopSignal,
    phase: Arc<AtomicU8>,
    cycles: Arc<AtomicU64>,
}

impl MonitorHandle {
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Healthy iff no fault has been recorded since the last drain.
    pub fn is_healthy(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn snapshot(&self) -> ConnectivitySnapshot {
        self.state.snapshot()
    }

    pub fn status(&self) -> StatusReport {
        self.state.status()
    }

    pub fn faults(&self) -> &FaultChannel {
        &self.faults
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase.load(Ordering::SeqCst).into()
    }

    /// Number of cycles that have run to completion.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Request a stop. Idempotent; takes effect between cycles.
    pub fn stop(&self) {
        self.stop.trigger();
        let _ = self.phase.compare_exchange(
            MonitorPhase::Running as u8,
            MonitorPhase::Stopping as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }
}

/// Periodically probes one target and records the results.
pub struct Monitor<P = TcpProber, S = InfluxSink> {
    prober: P,
    emitter: MetricsEmitter<S>,
    handle: MonitorHandle,
}

impl Monitor {
    /// Build the production monitor (TCP prober, InfluxDB sink).
    ///
    /// Fails before anything is probed or written if a mandatory setting
    /// is missing.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, ConfigError> {
        if let Err(e) = validate_config(config) {
            tracing::error!(error = %e, field = ?e.field(), "Invalid monitor configuration");
            return Err(e);
        }

        let target = Target::new(
            config.target.host.clone(),
            config.target.port(),
            config.target.probe_timeout(),
            config.target.interval(),
        );
        let sink = InfluxSink::new(&config.influxdb)?;

        Ok(Self::new(target, TcpProber::new(), sink))
    }
}

impl<P: Prober, S: MetricsSink> Monitor<P, S> {
    pub fn new(target: Target, prober: P, sink: S) -> Self {
        Self {
            prober,
            emitter: MetricsEmitter::new(sink),
            handle: MonitorHandle {
                target: Arc::new(target),
                state: Arc::new(ConnectivityTracker::new()),
                faults: Arc::new(FaultChannel::new()),
                stop: StopSignal::new(),
                phase: Arc::new(AtomicU8::new(MonitorPhase::Idle as u8)),
                cycles: Arc::new(AtomicU64::new(0)),
            },
        }
    }

    pub fn handle(&self) -> MonitorHandle {
        self.handle.clone()
    }

    pub fn target(&self) -> &Target {
        &self.handle.target
    }

    pub fn sink(&self) -> &S {
        self.emitter.sink()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Run cycles until stopped. Intended for a dedicated task.
    ///
    /// Probe and emit failures never end the loop. A second call while
    /// running (or after stopping) returns immediately.
    pub async fn run(&self) {
        let started = self.handle.phase.compare_exchange(
            MonitorPhase::Idle as u8,
            MonitorPhase::Running as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        if started.is_err() {
            tracing::warn!(phase = ?self.handle.phase(), "Monitor already started, ignoring run()");
            return;
        }

        let target = self.target();
        tracing::info!(
            addr = %target.address(),
            interval_secs = target.interval.as_secs_f64(),
            timeout_secs = target.timeout.as_secs_f64(),
            "Starting network latency monitor"
        );

        let stop = &self.handle.stop;
        loop {
            if stop.is_triggered() {
                break;
            }

            self.run_cycle().await;

            tokio::select! {
                _ = time::sleep(target.interval) => {}
                _ = stop.triggered() => {}
            }
        }

        self.handle
            .phase
            .store(MonitorPhase::Stopped as u8, Ordering::SeqCst);
        tracing::info!(
            cycles = self.handle.cycles_completed(),
            "Network latency monitor stopped"
        );
    }

    /// Execute one probe → update → emit → record cycle, without sleeping.
    pub async fn run_cycle(&self) {
        let target = self.target();
        let outcome = self.prober.probe(target).await;

        let flipped = self.handle.state.update(&outcome);
        self.log_outcome(&outcome, flipped);
        metrics::record_probe(target, &outcome);

        let emitted = self.emitter.emit(target, &outcome).await;

        if let ProbeOutcome::Failure(e) = outcome {
            self.record_fault(e.into());
        }
        if let Err(e) = emitted {
            tracing::error!(
                error = %e,
                measurement = %e.measurement,
                "Failed to write metrics; point dropped"
            );
            self.record_fault(e.into());
        }

        self.handle.cycles.fetch_add(1, Ordering::SeqCst);
    }

    fn record_fault(&self, error: MonitorError) {
        metrics::record_fault(error.phase());
        self.handle.faults.push(FaultRecord::new(error));
    }

    fn log_outcome(&self, outcome: &ProbeOutcome, flipped: bool) {
        let addr = self.target().address();
        match outcome {
            ProbeOutcome::Success { latency_ms } => {
                if flipped {
                    tracing::info!(addr = %addr, "Connectivity restored");
                }
                tracing::info!(
                    addr = %addr,
                    latency_ms = %format_args!("{latency_ms:.2}"),
                    "Probe succeeded"
                );
            }
            ProbeOutcome::Failure(e) => {
                if flipped {
                    tracing::warn!(addr = %addr, "Connectivity lost");
                }
                tracing::warn!(addr = %addr, error = %e, "Probe failed");
            }
        }
    }
}
