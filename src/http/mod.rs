//! HTTP query surface.
//!
//! # Data Flow
//! ```text
//! GET    /healthcheck          → FaultChannel::is_empty → 200 | 500
//! GET    /api/network-status   → ConnectivityTracker::snapshot → JSON
//! GET    /api/faults           → FaultChannel::snapshot → JSON
//! DELETE /api/faults           → FaultChannel::drain → {"drained": n}
//! ```

pub mod handlers;
pub mod server;

pub use server::{build_router, serve};
