//! Network latency monitor.
//!
//! Periodically opens a TCP connection to a configured target, records the
//! connect latency (or a drop) in InfluxDB, and serves liveness and status
//! endpoints.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────── monitor task ────────────────────────┐
//!   │  Prober ──▶ ConnectivityTracker ──▶ MetricsEmitter ──▶ Sink ─┼──▶ InfluxDB
//!   │     │                │                    │                  │
//!   │     └────────────────┼──── errors ────────┴──▶ FaultChannel  │
//!   └──────────────────────┼───────────────────────────────┼───────┘
//!                          │ snapshot                      │ is_empty
//!   ┌──────────────────────▼───────────────────────────────▼───────┐
//!   │  HTTP: /api/network-status            /healthcheck            │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use net_monitor::config::load_config;
use net_monitor::lifecycle::signals::shutdown_signal;
use net_monitor::observability::logging::{self, LogFormat};
use net_monitor::observability::metrics;
use net_monitor::Monitor;

/// How long to wait for the monitor loop to finish its current cycle.
const WORKER_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "net-monitor")]
#[command(about = "Probe a TCP endpoint and record latency in InfluxDB", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // .env may carry RUST_LOG, so it is read before the subscriber exists.
    let dotenv = dotenvy::dotenv();
    logging::init(cli.log_format);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env"),
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, field = ?e.field(), "Configuration rejected");
            return Err(e.into());
        }
    };

    tracing::info!(
        target_host = %config.target.host,
        target_port = config.target.port(),
        interval_secs = config.target.interval().as_secs(),
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start Prometheus exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let monitor = Arc::new(Monitor::from_config(&config)?);
    let handle = monitor.handle();

    let worker = {
        let monitor = monitor.clone();
        tokio::spawn(async move { monitor.run().await })
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let served = net_monitor::http::serve(listener, handle.clone(), shutdown_signal()).await;

    handle.stop();
    match tokio::time::timeout(WORKER_JOIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Monitor task panicked"),
        Err(_) => tracing::warn!(
            timeout_secs = WORKER_JOIN_TIMEOUT.as_secs(),
            "Monitor did not stop in time; abandoning in-flight cycle"
        ),
    }

    served?;
    tracing::info!("Shutdown complete");
    Ok(())
}
