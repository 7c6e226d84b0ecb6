//! Converts probe outcomes into metric points and writes them.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{FieldValue, MetricsSink, Point, SinkError};
use crate::probe::{ProbeOutcome, Target};

pub const LATENCY_MEASUREMENT: &str = "network_latency";
pub const DROPS_MEASUREMENT: &str = "connection_drops";

/// A point for this cycle could not be written and is lost.
#[derive(Debug, Error)]
#[error("failed to write {measurement} point: {source}")]
pub struct EmitError {
    pub measurement: String,
    #[source]
    pub source: SinkError,
}

/// Writes exactly one point per probe outcome.
#[derive(Debug)]
pub struct MetricsEmitter<S> {
    sink: S,
}

impl<S: MetricsSink> MetricsEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Build the point describing `outcome` at time `at`.
    pub fn point_for(target: &Target, outcome: &ProbeOutcome, at: DateTime<Utc>) -> Point {
        let point = match outcome {
            ProbeOutcome::Success { latency_ms } => Point::new(LATENCY_MEASUREMENT)
                .field("latency_ms", FieldValue::Float(*latency_ms)),
            ProbeOutcome::Failure(_) => {
                Point::new(DROPS_MEASUREMENT).field("drops", FieldValue::Integer(1))
            }
        };

        point
            .tag("host", target.host.as_str())
            .tag("port", target.port.to_string())
            .timestamp(at)
    }

    /// Write the point for `outcome`. Not retried on failure.
    pub async fn emit(&self, target: &Target, outcome: &ProbeOutcome) -> Result<(), EmitError> {
        let point = Self::point_for(target, outcome, Utc::now());
        self.sink.write(&point).await.map_err(|source| EmitError {
            measurement: point.measurement().to_string(),
            source,
        })
    }
}
