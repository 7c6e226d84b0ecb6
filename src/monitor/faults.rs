//! Fault channel: append-only record of cycle errors.
//!
//! Written only by the monitor loop; read and drained by external observers.
//! The core never removes records, so memory grows with the number of
//! faults until an observer drains them.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::probe::ProbeError;
use crate::sink::EmitError;

/// An error captured from one monitor cycle.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl MonitorError {
    pub fn phase(&self) -> FaultPhase {
        match self {
            MonitorError::Probe(_) => FaultPhase::Probe,
            MonitorError::Emit(_) => FaultPhase::Emit,
        }
    }
}

/// Step of the cycle a fault originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPhase {
    Probe,
    Emit,
}

impl FaultPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultPhase::Probe => "probe",
            FaultPhase::Emit => "emit",
        }
    }
}

impl fmt::Display for FaultPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded fault. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FaultRecord {
    pub error: Arc<MonitorError>,
    pub recorded_at: DateTime<Utc>,
}

impl FaultRecord {
    pub fn new(error: impl Into<MonitorError>) -> Self {
        Self {
            error: Arc::new(error.into()),
            recorded_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> FaultPhase {
        self.error.phase()
    }
}

/// Serializable view of a fault for the query surface.
#[derive(Debug, Clone, Serialize)]
pub struct FaultView {
    pub phase: FaultPhase,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<&FaultRecord> for FaultView {
    fn from(record: &FaultRecord) -> Self {
        Self {
            phase: record.phase(),
            message: record.error.to_string(),
            recorded_at: record.recorded_at,
        }
    }
}

/// Unbounded, thread-safe queue of faults.
///
/// Uses its own lock, independent of the connectivity state lock.
#[derive(Debug, Default)]
pub struct FaultChannel {
    records: Mutex<VecDeque<FaultRecord>>,
}

impl FaultChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: FaultRecord) {
        self.records.lock().push_back(record);
    }

    /// Liveness signal: true while no fault is pending.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Copy of all pending records, oldest first.
    pub fn snapshot(&self) -> Vec<FaultRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Remove and return all pending records. Observer-side only.
    pub fn drain(&self) -> Vec<FaultRecord> {
        self.records.lock().drain(..).collect()
    }
}
