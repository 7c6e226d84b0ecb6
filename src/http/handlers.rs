//! Query surface handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::monitor::{FaultView, MonitorHandle, StatusReport};

#[derive(Serialize)]
pub struct DrainSummary {
    pub drained: usize,
}

/// 200 while no fault is pending, 500 otherwise.
pub async fn healthcheck(State(monitor): State<MonitorHandle>) -> (StatusCode, Json<Value>) {
    if monitor.is_healthy() {
        (StatusCode::OK, Json(json!({ "status": "OK" })))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "Monitor exceptions detected" })),
        )
    }
}

pub async fn network_status(State(monitor): State<MonitorHandle>) -> Json<StatusReport> {
    Json(monitor.status())
}

pub async fn list_faults(State(monitor): State<MonitorHandle>) -> Json<Vec<FaultView>> {
    let faults = monitor.faults().snapshot();
    Json(faults.iter().map(FaultView::from).collect())
}

pub async fn drain_faults(State(monitor): State<MonitorHandle>) -> Json<DrainSummary> {
    let drained = monitor.faults().drain().len();
    tracing::info!(drained, "Fault channel drained");
    Json(DrainSummary { drained })
}
