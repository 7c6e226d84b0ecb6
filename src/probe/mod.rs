//! Reachability probing.
//!
//! # Data Flow
//! ```text
//! Target (host, port, timeout)
//!     → Prober::probe (one connection attempt, timed)
//!     → ProbeOutcome::Success { latency_ms } | ProbeOutcome::Failure(ProbeError)
//!     → consumed by the state tracker and the metrics emitter
//! ```
//!
//! # Design Decisions
//! - One attempt per cycle; failures are reported, never retried here
//! - Latency is kept as an unrounded f64 in milliseconds
//! - The Prober trait is the seam for alternative transports and test fakes

pub mod tcp;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub use tcp::TcpProber;

/// Immutable description of the endpoint being monitored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single connection attempt.
    pub timeout: Duration,
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration, interval: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
            interval,
        }
    }

    /// `host:port`, bracketing IPv6 literals.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Errors from a single probe attempt.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The connection was not established within the probe timeout.
    #[error("connection to {addr} timed out after {timeout:?}")]
    Timeout { addr: String, timeout: Duration },

    /// Resolution, refusal or any other transport failure.
    #[error("connection to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result of one probe. Lives for exactly one cycle.
#[derive(Debug)]
pub enum ProbeOutcome {
    Success { latency_ms: f64 },
    Failure(ProbeError),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            ProbeOutcome::Success { latency_ms } => Some(*latency_ms),
            ProbeOutcome::Failure(_) => None,
        }
    }
}

/// Performs one latency/reachability measurement against a target.
pub trait Prober: Send + Sync {
    fn probe(&self, target: &Target) -> impl Future<Output = ProbeOutcome> + Send;
}
