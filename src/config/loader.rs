//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::validate_config;

/// Error type for configuration loading.
///
/// This is the only fatal error in the monitor: it is raised before any
/// probe runs and is never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A mandatory setting is absent or empty.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A setting is present but unusable.
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    /// Name of the offending setting, when the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Missing(field) => Some(field),
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Load configuration from an optional TOML file, overlay the process
/// environment and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<MonitorConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides from `lookup` instead of the
/// process environment.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<MonitorConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => MonitorConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config)?;

    Ok(config)
}

/// Overlay values from `lookup` (normally the process environment).
///
/// Empty values are treated as absent so they never clear a file setting.
pub fn apply_env_overrides<F>(config: &mut MonitorConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(v) = get("INFLUXDB_URL") {
        config.influxdb.url = v;
    }
    if let Some(v) = get("INFLUXDB_TOKEN") {
        config.influxdb.token = v;
    }
    if let Some(v) = get("INFLUXDB_ORG") {
        config.influxdb.org = v;
    }
    if let Some(v) = get("INFLUXDB_BUCKET") {
        config.influxdb.bucket = v;
    }
    if let Some(v) = get("TARGET_HOST") {
        config.target.host = v;
    }
    if let Some(v) = get("TARGET_PORT") {
        config.target.port = Some(parse_integer("TARGET_PORT", &v)?);
    }
    if let Some(v) = get("CHECK_INTERVAL") {
        config.target.interval_secs = Some(parse_integer("CHECK_INTERVAL", &v)?);
    }
    if let Some(v) = get("PROBE_TIMEOUT") {
        config.target.probe_timeout_secs = Some(parse_integer("PROBE_TIMEOUT", &v)?);
    }
    if let Some(v) = get("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_flag("METRICS_ENABLED", &v)?;
    }
    if let Some(v) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = v;
    }

    Ok(())
}

/// Ranges are checked by validation, the same way for file and env values.
fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        field,
        reason: format!("not an integer (got {raw:?})"),
    })
}

fn parse_flag(field: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            field,
            reason: format!("expected a boolean (got {raw:?})"),
        }),
    }
}
