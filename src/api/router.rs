//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Routes:
//! - `GET /`          prediction form
//! - `POST /predict`  classifier + risk factors + recommendations
//! - `POST /bmi`      BMI calculator
//! - `GET /health`    liveness and model status
//! - `/static/*`      form assets

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router around the shared state.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    let static_dir = ctx.core.static_dir.clone();

    // Layers are applied from bottom (innermost) to top (outermost):
    //   Audit log (outermost) → nosniff header → Handler
    Router::new()
        .route("/", get(endpoints::index::page))
        .route("/predict", post(endpoints::predict::predict))
        .route("/bmi", post(endpoints::bmi::calculate))
        .route("/health", get(endpoints::health::check))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
}
