//! Monitoring core.
//!
//! # Data Flow
//! ```text
//! engine.rs (Monitor::run, one dedicated task)
//!     → Prober::probe
//!     → state.rs (ConnectivityTracker::update, under its lock)
//!     → MetricsEmitter::emit (sink write)
//!     → faults.rs (FaultChannel::push for each failed step)
//!     → sleep(interval) or stop
//!
//! Readers (HTTP layer, any thread):
//!     MonitorHandle::status   → ConnectivityTracker::snapshot
//!     MonitorHandle::is_healthy → FaultChannel::is_empty
//! ```
//!
//! # Design Decisions
//! - Single writer: only the loop mutates state or appends faults
//! - State lock and fault lock are independent and never held across I/O
//! - Faults are captured, never propagated out of the loop

pub mod engine;
pub mod faults;
pub mod state;

pub use engine::{Monitor, MonitorHandle, MonitorPhase};
pub use faults::{FaultChannel, FaultPhase, FaultRecord, FaultView, MonitorError};
pub use state::{ConnectivitySnapshot, ConnectivityTracker, StatusReport};
