//! InfluxDB v2 HTTP write client.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use super::{MetricsSink, Point, SinkError};
use crate::config::{ConfigError, InfluxConfig};

const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Writes points to the InfluxDB v2 `/api/v2/write` endpoint.
#[derive(Debug, Clone)]
pub struct InfluxSink {
    client: reqwest::Client,
    write_url: Url,
    token: String,
}

impl InfluxSink {
    /// Build a sink from validated configuration.
    pub fn new(config: &InfluxConfig) -> Result<Self, ConfigError> {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Build a sink that sends through a caller-supplied HTTP client.
    pub fn with_client(config: &InfluxConfig, client: reqwest::Client) -> Result<Self, ConfigError> {
        let invalid_url = |reason: String| ConfigError::Invalid {
            field: "INFLUXDB_URL",
            reason,
        };

        let mut write_url = Url::parse(&config.url).map_err(|e| invalid_url(e.to_string()))?;
        write_url
            .path_segments_mut()
            .map_err(|_| invalid_url("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["api", "v2", "write"]);
        write_url
            .query_pairs_mut()
            .clear()
            .append_pair("org", &config.org)
            .append_pair("bucket", &config.bucket)
            .append_pair("precision", "ns");

        Ok(Self {
            client,
            write_url,
            token: config.token.clone(),
        })
    }

    /// Fully qualified write endpoint, including org/bucket query.
    pub fn write_url(&self) -> &Url {
        &self.write_url
    }
}

impl MetricsSink for InfluxSink {
    async fn write(&self, point: &Point) -> Result<(), SinkError> {
        let response = self
            .client
            .post(self.write_url.clone())
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .timeout(WRITE_TIMEOUT)
            .body(point.to_line_protocol())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SinkError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
