//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Mandatory values default to empty/zero so that validation can name
//! whichever one was left out.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the network monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Metrics backend connection.
    pub influxdb: InfluxConfig,

    /// Endpoint being probed.
    pub target: TargetConfig,

    /// HTTP query surface.
    pub listener: ListenerConfig,

    /// Process metrics settings.
    pub observability: ObservabilityConfig,
}

/// InfluxDB v2 connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InfluxConfig {
    /// Base URL (e.g., "http://localhost:8086").
    pub url: String,

    /// API token.
    pub token: String,

    /// Organization name.
    pub org: String,

    /// Destination bucket.
    pub bucket: String,
}

/// Connect timeout used when none is configured.
pub const DEFAULT_PROBE_TIMEOUT_SECS: i64 = 5;

/// Probe target settings.
///
/// Numeric values are read wide and range-checked by validation, so an
/// out-of-range value is reported against its setting instead of failing
/// deserialization.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TargetConfig {
    pub host: String,

    /// `None` means unset.
    pub port: Option<i64>,

    /// Seconds between cycles. `None` means unset.
    pub interval_secs: Option<i64>,

    /// Connect timeout for a single probe, in seconds.
    pub probe_timeout_secs: Option<i64>,
}

impl TargetConfig {
    /// Validated port; 0 if the value is unset or out of range.
    pub fn port(&self) -> u16 {
        self.port.and_then(|p| u16::try_from(p).ok()).unwrap_or(0)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(non_negative(self.interval_secs.unwrap_or(0)))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(non_negative(
            self.probe_timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS),
        ))
    }
}

fn non_negative(secs: i64) -> u64 {
    u64::try_from(secs).unwrap_or(0)
}

/// Listener configuration for the HTTP query surface.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Address for the Prometheus exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
