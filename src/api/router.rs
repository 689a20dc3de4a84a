//! HTTP routing configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{
    database_info_handler, database_status_handler, health_check_handler, liveness_handler,
    readiness_handler,
};

/// Builds the application router with tracing and a request timeout.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/db/info", get(database_info_handler))
        .route("/db/status", get(database_status_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(TimeoutLayer::new(Duration::from_secs(10))),
        )
        .with_state(state)
}
