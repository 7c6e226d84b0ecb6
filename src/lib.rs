//! Network latency monitor library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod probe;
pub mod sink;

pub use config::MonitorConfig;
pub use lifecycle::StopSignal;
pub use monitor::{Monitor, MonitorHandle, MonitorPhase};
