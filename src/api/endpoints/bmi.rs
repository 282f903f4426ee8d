//! BMI calculator endpoint.

use axum::body::Bytes;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::intelligence::{calculate_bmi, BmiResult, BodyMeasurements};

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: BmiResult,
}

/// `POST /bmi` — BMI and weight category from height and weight.
pub async fn calculate(body: Bytes) -> Result<Json<BmiResponse>, ApiError> {
    let input: BodyMeasurements = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidMeasurements(e.to_string()))?;

    let result = calculate_bmi(&input)?;

    Ok(Json(BmiResponse {
        success: true,
        result,
    }))
}
