use axum::{routing::any, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Model name reported by the health check.
pub const MODEL_NAME: &str = "flux-2-dev";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Downstream model family served by this gateway.
    pub model: &'static str,
}

/// /health -- static liveness payload, on any method.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: MODEL_NAME,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", any(health_check))
}
