//! Liveness endpoint for deployment probes.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body reported by `/health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server is answering.
    pub status: String,
    /// Crate version, so deployments can verify what is running.
    pub version: String,
}

/// GET /health — unauthenticated, touches no dependency.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Returns the router for the liveness probe.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
