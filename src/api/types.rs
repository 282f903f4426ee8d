//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::core_state::CoreState;
use crate::models::PredictionResult;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes. Cloned per request; the inner
/// state is read-only.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Request context — injected by the request log middleware
// ═══════════════════════════════════════════════════════════

/// Per-request identifier, also echoed as `X-Request-Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ═══════════════════════════════════════════════════════════
// Success envelopes
// ═══════════════════════════════════════════════════════════

/// `POST /predict` success body: `success: true` followed by the result fields.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PredictionResult,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}
