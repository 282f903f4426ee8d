//! Rule-based interpretation around the classifier: risk factors,
//! recommendations, and assembly of the full prediction result.

pub mod assessment;
pub mod clinical;
pub mod recommendations;
pub mod risk_factors;

pub use assessment::assess;
pub use clinical::{calculate_bmi, BmiCategory, BmiResult, BodyMeasurements};
pub use recommendations::generate_recommendations;
pub use risk_factors::analyze_risk_factors;

/// Round to one decimal place. Works on the exact binary value, so true
/// ties go to even (`6.25` -> `6.2`) and near-ties go the way the stored
/// value actually lies (`0.15` -> `0.1`).
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_one_decimal(6.25), 6.2);
        assert_eq!(round_one_decimal(93.75), 93.8);
        assert_eq!(round_one_decimal(81.25), 81.2);
        assert_eq!(round_one_decimal(18.75), 18.8);
    }

    #[test]
    fn near_ties_follow_stored_value() {
        assert_eq!(round_one_decimal(0.15), 0.1);
        assert_eq!(round_one_decimal(22.857142857142858), 22.9);
        assert_eq!(round_one_decimal(100.0), 100.0);
        assert_eq!(round_one_decimal(0.0), 0.0);
    }
}
