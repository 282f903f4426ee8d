//! Process-wide application state.
//!
//! `CoreState` is built once at startup, wrapped in `Arc`, and shared by
//! every request handler. It holds the classifier (or the reason it could
//! not be loaded) and never changes afterwards, so reads need no lock.

use std::path::PathBuf;
use std::sync::Arc;

use crate::classifier::{self, Classifier, LoadedModel, ModelInfo};
use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CoreError {
    /// The classifier failed to load at startup. Carries the user-facing reason.
    #[error("{0}")]
    ModelUnavailable(String),
}

/// Shared, read-only state for the HTTP layer.
pub struct CoreState {
    model: Result<LoadedModel, String>,
    /// Reject out-of-range measurements before inference.
    pub enforce_ranges: bool,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl CoreState {
    /// Attempt the one and only classifier load. A failed load is recorded
    /// rather than returned, so the server still starts and reports
    /// `model_loaded: false`.
    pub fn initialize(config: &ServerConfig) -> Self {
        let model = classifier::load_classifier(&config.model_path, config.model_sha256.as_deref())
            .map_err(|e| {
                tracing::warn!(
                    path = %config.model_path.display(),
                    error = %e,
                    "Classifier unavailable, /predict will report errors"
                );
                e.to_string()
            });

        Self {
            model,
            enforce_ranges: config.enforce_ranges,
            static_dir: config.static_dir.clone(),
        }
    }

    /// State around an already-loaded model.
    pub fn with_model(model: LoadedModel, config: &ServerConfig) -> Self {
        Self {
            model: Ok(model),
            enforce_ranges: config.enforce_ranges,
            static_dir: config.static_dir.clone(),
        }
    }

    /// State with no usable model; `reason` is reported to clients.
    pub fn without_model(reason: impl Into<String>, config: &ServerConfig) -> Self {
        Self {
            model: Err(reason.into()),
            enforce_ranges: config.enforce_ranges,
            static_dir: config.static_dir.clone(),
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_ok()
    }

    /// The classifier, or `ModelUnavailable` if the load failed.
    pub fn classifier(&self) -> Result<Arc<dyn Classifier>, CoreError> {
        self.model
            .as_ref()
            .map(|m| Arc::clone(&m.classifier))
            .map_err(|reason| CoreError::ModelUnavailable(reason.clone()))
    }

    pub fn model_info(&self) -> Option<&ModelInfo> {
        self.model.as_ref().ok().map(|m| &m.info)
    }
}
