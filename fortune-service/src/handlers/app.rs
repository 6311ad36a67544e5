use crate::services::metrics::get_metrics;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness text kept for existing probes.
pub async fn index() -> &'static str {
    "Astrology App Server is running"
}

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "fortune-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check: the text model provider must answer.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.fortune.provider().health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Provider not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        get_metrics(),
    )
}
