//! Time-series metrics output.
//!
//! # Data Flow
//! ```text
//! ProbeOutcome
//!     → emitter.rs (one Point per cycle, tagged host/port)
//!     → point.rs (line protocol encoding)
//!     → MetricsSink::write (influx.rs: HTTP POST to /api/v2/write)
//! ```
//!
//! # Measurements
//! - `network_latency` (field `latency_ms`, float): probe succeeded
//! - `connection_drops` (field `drops`, integer 1): probe failed
//!
//! # Design Decisions
//! - Writes are synchronous from the loop's point of view
//! - No retry, no buffering: a rejected write is a lost point
//! - The sink is owned by the loop, so it needs no locking

pub mod emitter;
pub mod influx;
pub mod point;

use std::future::Future;
use thiserror::Error;

pub use emitter::{EmitError, MetricsEmitter};
pub use influx::InfluxSink;
pub use point::{FieldValue, Point};

/// Errors returned by a sink when a write does not land.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The backend could not be reached or the request failed in transit.
    #[error("request to metrics backend failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("metrics backend rejected write with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Destination for metric points.
pub trait MetricsSink: Send + Sync {
    fn write(&self, point: &Point) -> impl Future<Output = Result<(), SinkError>> + Send;
}
