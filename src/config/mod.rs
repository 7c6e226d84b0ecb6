//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (.env, process env)
//!     → validation.rs (mandatory fields, value ranges)
//!     → MonitorConfig (validated, immutable)
//!     → consumed once by Monitor::from_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the monitor never re-reads it
//! - Environment variables win over file values
//! - Missing mandatory settings are reported by their environment name

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{InfluxConfig, ListenerConfig, MonitorConfig, ObservabilityConfig, TargetConfig};
