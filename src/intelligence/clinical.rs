//! BMI calculator backing the form's height/weight helper.

use serde::{Deserialize, Serialize};

use super::risk_factors::{BMI_OBESE, BMI_OVERWEIGHT};

/// Lower bound of the healthy BMI band.
pub const BMI_UNDERWEIGHT: f64 = 18.5;

const CM_PER_INCH: f64 = 2.54;
const KG_PER_LB: f64 = 0.453592;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    Cm,
    /// Feet, with an optional `inches` remainder.
    Ft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

/// Body measurements as entered in the calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyMeasurements {
    pub height: f64,
    #[serde(default = "default_height_unit")]
    pub height_unit: HeightUnit,
    /// Only read when `height_unit` is `ft`.
    #[serde(default)]
    pub inches: f64,
    pub weight: f64,
    #[serde(default = "default_weight_unit")]
    pub weight_unit: WeightUnit,
}

fn default_height_unit() -> HeightUnit {
    HeightUnit::Cm
}

fn default_weight_unit() -> WeightUnit {
    WeightUnit::Kg
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal Weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        if bmi < BMI_UNDERWEIGHT {
            Self::Underweight
        } else if bmi < BMI_OVERWEIGHT {
            Self::NormalWeight
        } else if bmi < BMI_OBESE {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Human-readable band, as shown next to the result.
    pub fn range(&self) -> &'static str {
        match self {
            Self::Underweight => "BMI < 18.5",
            Self::NormalWeight => "BMI 18.5 - 24.9",
            Self::Overweight => "BMI 25.0 - 29.9",
            Self::Obese => "BMI ≥ 30.0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    /// kg/m², one decimal.
    pub bmi: f64,
    pub category: BmiCategory,
    pub range: &'static str,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BmiError {
    #[error("height must be a positive number")]
    InvalidHeight,
    #[error("weight must be a positive number")]
    InvalidWeight,
}

/// Compute BMI from height and weight in any supported unit.
pub fn calculate_bmi(input: &BodyMeasurements) -> Result<BmiResult, BmiError> {
    let height_m = match input.height_unit {
        HeightUnit::Cm => input.height / 100.0,
        HeightUnit::Ft => {
            if !input.inches.is_finite() || input.inches < 0.0 {
                return Err(BmiError::InvalidHeight);
            }
            (input.height * 12.0 + input.inches) * CM_PER_INCH / 100.0
        }
    };
    if !height_m.is_finite() || height_m <= 0.0 || input.height < 0.0 {
        return Err(BmiError::InvalidHeight);
    }

    let weight_kg = match input.weight_unit {
        WeightUnit::Kg => input.weight,
        WeightUnit::Lbs => input.weight * KG_PER_LB,
    };
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(BmiError::InvalidWeight);
    }

    let bmi = weight_kg / (height_m * height_m);
    let category = BmiCategory::classify(bmi);

    Ok(BmiResult {
        bmi: super::round_one_decimal(bmi),
        category,
        range: category.range(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(height_cm: f64, weight_kg: f64) -> BodyMeasurements {
        BodyMeasurements {
            height: height_cm,
            height_unit: HeightUnit::Cm,
            inches: 0.0,
            weight: weight_kg,
            weight_unit: WeightUnit::Kg,
        }
    }

    #[test]
    fn metric_bmi() {
        let result = calculate_bmi(&metric(175.0, 70.0)).unwrap();
        assert_eq!(result.bmi, 22.9);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.range, "BMI 18.5 - 24.9");
    }

    #[test]
    fn imperial_bmi() {
        let input = BodyMeasurements {
            height: 5.0,
            height_unit: HeightUnit::Ft,
            inches: 10.0,
            weight: 200.0,
            weight_unit: WeightUnit::Lbs,
        };
        let result = calculate_bmi(&input).unwrap();
        assert_eq!(result.bmi, 28.7);
        assert_eq!(result.category, BmiCategory::Overweight);
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(BmiCategory::classify(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn zero_height_rejected() {
        assert_eq!(
            calculate_bmi(&metric(0.0, 70.0)).unwrap_err(),
            BmiError::InvalidHeight
        );
    }

    #[test]
    fn negative_weight_rejected() {
        assert_eq!(
            calculate_bmi(&metric(170.0, -1.0)).unwrap_err(),
            BmiError::InvalidWeight
        );
    }

    #[test]
    fn units_default_to_metric() {
        let input: BodyMeasurements =
            serde_json::from_str(r#"{"height": 160, "weight": 80}"#).unwrap();
        assert_eq!(input.height_unit, HeightUnit::Cm);
        assert_eq!(input.weight_unit, WeightUnit::Kg);
        assert_eq!(calculate_bmi(&input).unwrap().category, BmiCategory::Obese);
    }

    #[test]
    fn category_serializes_as_display_name() {
        assert_eq!(
            serde_json::to_string(&BmiCategory::NormalWeight).unwrap(),
            "\"Normal Weight\""
        );
    }
}
