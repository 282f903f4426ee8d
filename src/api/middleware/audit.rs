//! Audit logging middleware.
//!
//! Tags every request with a `RequestId`, echoes it as `X-Request-Id`,
//! and logs method, path, status, and latency once the handler returns.

use std::time::Instant;

use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::RequestId;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log API access. Runs outermost so the id covers static assets too.
pub async fn log_access(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let request_id = RequestId::new();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    req.extensions_mut().insert(request_id);

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        %request_id,
        %method,
        path = %path,
        status,
        elapsed_ms,
        "Request handled"
    );

    if let Ok(val) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    response
}
