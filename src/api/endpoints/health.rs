//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub version: &'static str,
}

/// `GET /health` — liveness plus whether the classifier is usable.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: ctx.core.is_model_loaded(),
        version: crate::config::APP_VERSION,
    })
}
