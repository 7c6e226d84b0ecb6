//! Connectivity state tracking.
//!
//! # State Transitions
//! ```text
//! Success: connected = true,  last_success = now, last_check = now
//! Failure: connected = false,                     last_check = now
//! ```
//!
//! Downtime is derived on every read, never stored.

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::probe::ProbeOutcome;

#[derive(Debug, Clone, Copy)]
struct ConnectivityState {
    connected: bool,
    last_success_time: DateTime<Utc>,
    last_check_time: DateTime<Utc>,
}

/// Consistent view of the connectivity state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectivitySnapshot {
    pub connected: bool,
    pub last_success_time: DateTime<Utc>,
    pub last_check_time: DateTime<Utc>,
    /// 0 while connected, else seconds since the last success.
    pub downtime_seconds: f64,
}

/// Status query payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub connected: bool,
    /// ISO-8601 UTC, whole seconds.
    pub last_success: String,
    /// Rounded to one decimal place.
    pub downtime_seconds: f64,
}

impl From<ConnectivitySnapshot> for StatusReport {
    fn from(snapshot: ConnectivitySnapshot) -> Self {
        Self {
            connected: snapshot.connected,
            last_success: snapshot
                .last_success_time
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            downtime_seconds: (snapshot.downtime_seconds * 10.0).round() / 10.0,
        }
    }
}

/// Last-known connectivity of the target, shared between the monitor loop
/// (single writer) and any number of readers.
///
/// Every read and write takes the same lock, so a snapshot never mixes
/// fields from two different updates.
#[derive(Debug)]
pub struct ConnectivityTracker {
    state: Mutex<ConnectivityState>,
}

impl ConnectivityTracker {
    /// Starts optimistic: connected, with both timestamps at construction.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(ConnectivityState {
                connected: true,
                last_success_time: now,
                last_check_time: now,
            }),
        }
    }

    /// Record the outcome of a probe. Returns true if `connected` flipped.
    pub fn update(&self, outcome: &ProbeOutcome) -> bool {
        self.update_at(outcome, Utc::now())
    }

    pub fn update_at(&self, outcome: &ProbeOutcome, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        let was_connected = state.connected;

        state.connected = outcome.is_success();
        state.last_check_time = now;
        if state.connected {
            state.last_success_time = now;
        }

        was_connected != state.connected
    }

    pub fn snapshot(&self) -> ConnectivitySnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> ConnectivitySnapshot {
        let state = *self.state.lock();

        let downtime_seconds = if state.connected {
            0.0
        } else {
            let elapsed = now - state.last_success_time;
            (elapsed.num_milliseconds() as f64 / 1000.0).max(0.0)
        };

        ConnectivitySnapshot {
            connected: state.connected,
            last_success_time: state.last_success_time,
            last_check_time: state.last_check_time,
            downtime_seconds,
        }
    }

    pub fn status(&self) -> StatusReport {
        self.snapshot().into()
    }
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self::new()
    }
}
