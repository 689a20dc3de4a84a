//! HTTP request handlers.
//!
//! All handlers go through the `DatabaseService` facade. A degraded
//! database is reported as a 503 with a JSON body, never a crash.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::AppState;
use crate::domain::{DatabaseStatus, HealthResponse};

/// Full health report: probes the database and includes the connection
/// state and configured driver.
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response: HealthResponse = state.database.health_response().await;

    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness: the process is up. No dependency probes.
pub async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "alive" })))
}

/// Readiness: the database must answer the probe before traffic is routed.
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.database.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready" })),
        )
    }
}

/// Identity of the connected database. 503 when unavailable; the facade
/// returns `None` for both "not attached" and "query failed".
pub async fn database_info_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.database.database_info().await {
        Some(info) => (StatusCode::OK, Json(json!(info))),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": {
                    "code": "database_unavailable",
                    "message": "database info is not available",
                }
            })),
        ),
    }
}

/// Connection state and driver selection snapshot.
pub async fn database_status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status: DatabaseStatus = state.database.status().await;
    Json(json!({
        "status": status,
        "driver": state.database.driver_kind(),
    }))
}
