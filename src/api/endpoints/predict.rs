//! Prediction endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, PredictResponse, RequestId};
use crate::intelligence::assess;
use crate::models::PatientRecord;

/// `POST /predict` — classify one patient record.
///
/// The body is taken raw and decoded here so that bad JSON is reported
/// through the usual `success: false` envelope instead of an extractor
/// rejection.
pub async fn predict(
    State(ctx): State<ApiContext>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let classifier = ctx.core.classifier()?;

    let record = PatientRecord::from_slice(&body)?;
    if ctx.core.enforce_ranges {
        record.check_ranges()?;
    }

    let result = assess(&record, classifier.as_ref())?;

    tracing::info!(
        %request_id,
        prediction = result.prediction,
        risk_factors = result.risk_factors.len(),
        "Prediction served"
    );

    Ok(Json(result.into()))
}
