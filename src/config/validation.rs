//! Configuration validation.
//!
//! # Responsibilities
//! - Reject configs with a missing mandatory setting, naming it
//! - Validate value ranges (port 1-65535, interval and timeout > 0)
//! - Absent values are `Missing`; present but unusable ones are `Invalid`
//! - Check the metrics backend URL parses
//!
//! # Design Decisions
//! - Reports the first problem in a fixed field order
//! - Validation is a pure function: MonitorConfig → Result<(), ConfigError>
//! - Runs before any monitor, client or socket is created

use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::MonitorConfig;

/// Validate a fully merged configuration.
pub fn validate_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    let mandatory = [
        ("INFLUXDB_URL", config.influxdb.url.as_str()),
        ("INFLUXDB_TOKEN", config.influxdb.token.as_str()),
        ("INFLUXDB_ORG", config.influxdb.org.as_str()),
        ("INFLUXDB_BUCKET", config.influxdb.bucket.as_str()),
        ("TARGET_HOST", config.target.host.as_str()),
    ];
    for (field, value) in mandatory {
        if value.trim().is_empty() {
            return Err(ConfigError::Missing(field));
        }
    }
    let target = &config.target;
    match target.port {
        None => return Err(ConfigError::Missing("TARGET_PORT")),
        Some(port) if !(1..=i64::from(u16::MAX)).contains(&port) => {
            return Err(ConfigError::Invalid {
                field: "TARGET_PORT",
                reason: format!("must be between 1 and 65535 (got {port})"),
            });
        }
        Some(_) => {}
    }
    match target.interval_secs {
        None => return Err(ConfigError::Missing("CHECK_INTERVAL")),
        Some(secs) => require_positive("CHECK_INTERVAL", secs)?,
    }
    if let Some(secs) = target.probe_timeout_secs {
        require_positive("PROBE_TIMEOUT", secs)?;
    }

    let url = Url::parse(&config.influxdb.url).map_err(|e| ConfigError::Invalid {
        field: "INFLUXDB_URL",
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            field: "INFLUXDB_URL",
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    Ok(())
}

fn require_positive(field: &'static str, secs: i64) -> Result<(), ConfigError> {
    if secs > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number of seconds (got {secs})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MonitorConfig {
        let mut config = MonitorConfig::default();
        config.influxdb.url = "http://localhost:8086".into();
        config.influxdb.token = "token".into();
        config.influxdb.org = "org".into();
        config.influxdb.bucket = "bucket".into();
        config.target.host = "example.com".into();
        config.target.port = Some(443);
        config.target.interval_secs = Some(5);
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let cases: [(&str, fn(&mut MonitorConfig)); 7] = [
            ("INFLUXDB_URL", |c| c.influxdb.url.clear()),
            ("INFLUXDB_TOKEN", |c| c.influxdb.token.clear()),
            ("INFLUXDB_ORG", |c| c.influxdb.org.clear()),
            ("INFLUXDB_BUCKET", |c| c.influxdb.bucket.clear()),
            ("TARGET_HOST", |c| c.target.host.clear()),
            ("TARGET_PORT", |c| c.target.port = None),
            ("CHECK_INTERVAL", |c| c.target.interval_secs = None),
        ];

        for (field, clear) in cases {
            let mut config = valid();
            clear(&mut config);
            match validate_config(&config) {
                Err(ConfigError::Missing(name)) => assert_eq!(name, field),
                other => panic!("expected Missing({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let mut config = valid();
        config.influxdb.org.clear();
        config.target.host.clear();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.field(), Some("INFLUXDB_ORG"));
    }

    #[test]
    fn test_present_but_unusable_values_are_invalid() {
        let cases: [(&str, fn(&mut MonitorConfig)); 5] = [
            ("TARGET_PORT", |c| c.target.port = Some(0)),
            ("TARGET_PORT", |c| c.target.port = Some(65_536)),
            ("TARGET_PORT", |c| c.target.port = Some(-80)),
            ("CHECK_INTERVAL", |c| c.target.interval_secs = Some(0)),
            ("CHECK_INTERVAL", |c| c.target.interval_secs = Some(-5)),
        ];

        for (field, corrupt) in cases {
            let mut config = valid();
            corrupt(&mut config);
            match validate_config(&config) {
                Err(ConfigError::Invalid { field: name, .. }) => assert_eq!(name, field),
                other => panic!("expected Invalid({field}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = valid();
        config.influxdb.url = "not a url".into();
        assert_eq!(validate_config(&config).unwrap_err().field(), Some("INFLUXDB_URL"));

        config.influxdb.url = "ftp://influx".into();
        assert_eq!(validate_config(&config).unwrap_err().field(), Some("INFLUXDB_URL"));
    }
}
