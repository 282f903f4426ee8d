//! API error types with structured JSON responses.
//!
//! Failures are reported in the body (`success: false`) with HTTP 200,
//! which is what the form page and existing clients expect.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::classifier::ClassifierError;
use crate::core_state::CoreError;
use crate::intelligence::clinical::BmiError;
use crate::models::InputError;

/// Error envelope returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    ModelUnavailable(String),
    #[error("Prediction error: {0}")]
    MalformedInput(#[from] InputError),
    #[error("Prediction error: {0}")]
    Inference(#[from] ClassifierError),
    #[error("BMI error: {0}")]
    InvalidMeasurements(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ModelUnavailable(reason) => {
                tracing::warn!(reason = %reason, "Prediction refused, model unavailable");
            }
            ApiError::Inference(e) => {
                tracing::error!(error = %e, "Classifier inference failed");
            }
            ApiError::MalformedInput(e) => {
                tracing::debug!(error = %e, "Rejected malformed prediction input");
            }
            ApiError::InvalidMeasurements(detail) => {
                tracing::debug!(detail = %detail, "Rejected BMI input");
            }
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ModelUnavailable(reason) => ApiError::ModelUnavailable(reason),
        }
    }
}

impl From<BmiError> for ApiError {
    fn from(err: BmiError) -> Self {
        ApiError::InvalidMeasurements(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn model_unavailable_is_in_body_with_200() {
        let (status, json) = body_json(ApiError::ModelUnavailable(
            "Model not found. Please ensure model.json exists.".into(),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "Model not found. Please ensure model.json exists."
        );
    }

    #[tokio::test]
    async fn malformed_input_is_prefixed() {
        let (status, json) = body_json(InputError::MissingField("glucose").into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["error"],
            "Prediction error: missing required field: glucose"
        );
    }

    #[tokio::test]
    async fn inference_failure_is_prefixed() {
        let (_, json) =
            body_json(ClassifierError::Inference("session crashed".into()).into()).await;
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "Prediction error: Inference failed: session crashed"
        );
    }

    #[tokio::test]
    async fn core_error_maps_to_model_unavailable() {
        let api_err: ApiError = CoreError::ModelUnavailable("gone".into()).into();
        assert!(matches!(api_err, ApiError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn bmi_error_maps_to_invalid_measurements() {
        let (_, json) = body_json(BmiError::InvalidHeight.into()).await;
        assert_eq!(json["error"], "BMI error: height must be a positive number");
    }
}
