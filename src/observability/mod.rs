//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor loop produces:
//!     → logging.rs (structured log events: cycles, transitions, faults)
//!     → metrics.rs (latency histogram, failure and fault counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing, pretty for development
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
