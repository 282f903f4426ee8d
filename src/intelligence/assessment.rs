use crate::classifier::{Classifier, ClassifierError};
use crate::models::{PatientRecord, PredictionResult};

use super::{analyze_risk_factors, generate_recommendations, round_one_decimal};

/// Run the classifier on one record and attach the rule-based
/// explanations. Either every section is produced or an error is returned.
pub fn assess(
    record: &PatientRecord,
    classifier: &dyn Classifier,
) -> Result<PredictionResult, ClassifierError> {
    let features = record.features();
    let prediction = classifier.predict(&features)?;
    let [p_no, p_yes] = classifier.predict_probability(&features)?;

    let result = PredictionResult {
        prediction: prediction.code(),
        risk_level: prediction.risk_level(),
        risk_class: prediction.risk_class(),
        confidence: round_one_decimal(p_no.max(p_yes) * 100.0),
        probability_no_diabetes: round_one_decimal(p_no * 100.0),
        probability_diabetes: round_one_decimal(p_yes * 100.0),
        risk_factors: analyze_risk_factors(record),
        recommendations: generate_recommendations(record, prediction),
    };

    tracing::debug!(
        gender = record.gender.label(),
        smoking = record.smoking_history.label(),
        prediction = result.prediction,
        confidence = result.confidence,
        factors = result.risk_factors.len(),
        "Assessment complete"
    );

    Ok(result)
}
