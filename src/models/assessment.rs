use serde::Serialize;

use super::enums::{Priority, RiskClass, RiskSeverity};

/// Binary model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    NoDiabetes,
    Diabetes,
}

impl Prediction {
    /// Class index as reported by the classifier (0 or 1).
    pub fn from_class(class: usize) -> Option<Self> {
        match class {
            0 => Some(Self::NoDiabetes),
            1 => Some(Self::Diabetes),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::NoDiabetes => 0,
            Self::Diabetes => 1,
        }
    }

    pub fn risk_level(&self) -> &'static str {
        match self {
            Self::NoDiabetes => "Low Risk",
            Self::Diabetes => "High Risk",
        }
    }

    pub fn risk_class(&self) -> RiskClass {
        match self {
            Self::NoDiabetes => RiskClass::Low,
            Self::Diabetes => RiskClass::High,
        }
    }
}

/// A triggered clinical condition shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub factor: &'static str,
    pub value: String,
    pub risk: RiskSeverity,
    pub description: &'static str,
}

/// Fixed-text advice, conditionally included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Font Awesome class rendered by the form page.
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
}

/// Everything `/predict` returns on success, minus the envelope flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub risk_level: &'static str,
    pub risk_class: RiskClass,
    /// Larger of the two probabilities, percent.
    pub confidence: f64,
    pub probability_no_diabetes: f64,
    pub probability_diabetes: f64,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_labels() {
        assert_eq!(Prediction::Diabetes.risk_level(), "High Risk");
        assert_eq!(Prediction::Diabetes.risk_class(), RiskClass::High);
        assert_eq!(Prediction::NoDiabetes.risk_level(), "Low Risk");
        assert_eq!(Prediction::NoDiabetes.risk_class(), RiskClass::Low);
    }

    #[test]
    fn only_binary_classes_map() {
        assert_eq!(Prediction::from_class(0), Some(Prediction::NoDiabetes));
        assert_eq!(Prediction::from_class(1).map(|p| p.code()), Some(1));
        assert_eq!(Prediction::from_class(2), None);
    }
}
