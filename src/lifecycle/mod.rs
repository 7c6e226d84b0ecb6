//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Stop (shutdown.rs):
//!     stop() from any task → StopSignal flips → monitor loop wakes
//!     → loop observes flag at top of next iteration → exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → HTTP server drains → monitor stop() → worker joined
//! ```
//!
//! # Design Decisions
//! - Cancellation is cooperative; an in-flight probe always completes
//! - The stop flag is level-triggered: stopping before run() still counts
//! - Worker join has a deadline owned by the caller

pub mod shutdown;
pub mod signals;

pub use shutdown::StopSignal;
