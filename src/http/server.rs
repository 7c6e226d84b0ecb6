//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the query handlers
//! - Wire up request tracing
//! - Serve until the shutdown future resolves

use axum::{routing::get, Router};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{drain_faults, healthcheck, list_faults, network_status};
use crate::monitor::MonitorHandle;

/// Build the router. Handlers only read through the handle.
pub fn build_router(monitor: MonitorHandle) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/api/network-status", get(network_status))
        .route("/api/faults", get(list_faults).delete(drain_faults))
        .with_state(monitor)
        .layer(TraceLayer::new_for_http())
}

/// Serve the query surface on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    monitor: MonitorHandle,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, build_router(monitor))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
