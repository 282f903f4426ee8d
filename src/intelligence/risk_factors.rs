//! Risk factor analysis: seven independent threshold checks, each adding
//! at most one factor. Output order is fixed and part of the API contract.

use crate::models::patient::format_measurement;
use crate::models::{PatientRecord, RiskFactor, RiskSeverity};

/// Age (years) at which age becomes a factor, and where it escalates.
pub const AGE_MODERATE: f64 = 45.0;
pub const AGE_ELEVATED: f64 = 60.0;

/// BMI thresholds: overweight / obese.
pub const BMI_OVERWEIGHT: f64 = 25.0;
pub const BMI_OBESE: f64 = 30.0;

/// HbA1c (%) thresholds: pre-diabetes / diabetes range.
pub const HBA1C_PREDIABETES: f64 = 5.7;
pub const HBA1C_DIABETES: f64 = 6.5;

/// Fasting glucose (mg/dL) thresholds: pre-diabetes / diabetes range.
pub const GLUCOSE_PREDIABETES: f64 = 100.0;
pub const GLUCOSE_DIABETES: f64 = 126.0;

/// Evaluate every rule in order: age, BMI, HbA1c, glucose, hypertension,
/// heart disease, smoking.
pub fn analyze_risk_factors(record: &PatientRecord) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if record.age >= AGE_MODERATE {
        factors.push(RiskFactor {
            factor: "Age",
            value: format!("{} years", format_measurement(record.age)),
            risk: if record.age >= AGE_ELEVATED {
                RiskSeverity::Elevated
            } else {
                RiskSeverity::Moderate
            },
            description: "Age is a significant risk factor for diabetes",
        });
    }

    if record.bmi >= BMI_OVERWEIGHT {
        factors.push(RiskFactor {
            factor: "BMI",
            value: format!("{} kg/m²", format_measurement(record.bmi)),
            risk: high_or_moderate(record.bmi >= BMI_OBESE),
            description: "Overweight/obesity increases diabetes risk",
        });
    }

    if record.hba1c >= HBA1C_PREDIABETES {
        factors.push(RiskFactor {
            factor: "HbA1c Level",
            value: format!("{}%", format_measurement(record.hba1c)),
            risk: high_or_moderate(record.hba1c >= HBA1C_DIABETES),
            description: "Elevated HbA1c indicates poor glucose control",
        });
    }

    if record.glucose >= GLUCOSE_PREDIABETES {
        factors.push(RiskFactor {
            factor: "Blood Glucose",
            value: format!("{} mg/dL", format_measurement(record.glucose)),
            risk: high_or_moderate(record.glucose >= GLUCOSE_DIABETES),
            description: "Elevated glucose levels indicate diabetes risk",
        });
    }

    if record.hypertension.is_present() {
        factors.push(RiskFactor {
            factor: "Hypertension",
            value: record.hypertension.label().to_string(),
            risk: RiskSeverity::Moderate,
            description: "High blood pressure increases diabetes risk",
        });
    }

    if record.heart_disease.is_present() {
        factors.push(RiskFactor {
            factor: "Heart Disease",
            value: record.heart_disease.label().to_string(),
            risk: RiskSeverity::High,
            description: "Cardiovascular disease strongly linked to diabetes",
        });
    }

    if record.smoking_history.is_risk() {
        factors.push(RiskFactor {
            factor: "Smoking",
            value: record.smoking_history.label().to_string(),
            risk: RiskSeverity::Moderate,
            description: "Smoking increases risk of type 2 diabetes",
        });
    }

    factors
}

fn high_or_moderate(high: bool) -> RiskSeverity {
    if high {
        RiskSeverity::High
    } else {
        RiskSeverity::Moderate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patient::tests::{healthy_record, high_risk_record};
    use crate::models::{Flag, SmokingHistory};

    fn names(factors: &[RiskFactor]) -> Vec<&'static str> {
        factors.iter().map(|f| f.factor).collect()
    }

    #[test]
    fn healthy_record_has_no_factors() {
        assert!(analyze_risk_factors(&healthy_record()).is_empty());
    }

    #[test]
    fn values_just_below_thresholds_trigger_nothing() {
        let mut record = healthy_record();
        record.age = 44.9;
        record.bmi = 24.99;
        record.hba1c = 5.69;
        record.glucose = 99.9;
        record.smoking_history = SmokingHistory::Former;
        assert!(analyze_risk_factors(&record).is_empty());
    }

    #[test]
    fn every_factor_in_fixed_order() {
        let factors = analyze_risk_factors(&high_risk_record());

        assert_eq!(
            names(&factors),
            vec![
                "Age",
                "BMI",
                "HbA1c Level",
                "Blood Glucose",
                "Hypertension",
                "Heart Disease",
                "Smoking"
            ]
        );
        let risks: Vec<RiskSeverity> = factors.iter().map(|f| f.risk).collect();
        assert_eq!(
            risks,
            vec![
                RiskSeverity::Elevated,
                RiskSeverity::High,
                RiskSeverity::High,
                RiskSeverity::High,
                RiskSeverity::Moderate,
                RiskSeverity::High,
                RiskSeverity::Moderate,
            ]
        );
    }

    #[test]
    fn values_are_formatted_with_units() {
        let factors = analyze_risk_factors(&high_risk_record());
        let values: Vec<&str> = factors.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(
            values,
            vec![
                "60.0 years",
                "31.0 kg/m²",
                "6.6%",
                "130.0 mg/dL",
                "Present",
                "Present",
                "Current"
            ]
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        let mut record = healthy_record();
        record.age = 45.0;
        record.bmi = 25.0;
        record.hba1c = 5.7;
        record.glucose = 100.0;

        let factors = analyze_risk_factors(&record);
        assert_eq!(factors.len(), 4);
        assert!(factors.iter().all(|f| f.risk == RiskSeverity::Moderate));

        record.age = 60.0;
        record.bmi = 30.0;
        record.hba1c = 6.5;
        record.glucose = 126.0;
        let risks: Vec<RiskSeverity> =
            analyze_risk_factors(&record).iter().map(|f| f.risk).collect();
        assert_eq!(
            risks,
            vec![
                RiskSeverity::Elevated,
                RiskSeverity::High,
                RiskSeverity::High,
                RiskSeverity::High
            ]
        );
    }

    #[test]
    fn ever_smoker_is_a_factor_former_is_not() {
        let mut record = healthy_record();
        record.smoking_history = SmokingHistory::Ever;
        let factors = analyze_risk_factors(&record);
        assert_eq!(names(&factors), vec!["Smoking"]);
        assert_eq!(factors[0].value, "Ever");

        for code in [0.0, 3.0, 4.0, 5.0] {
            record.smoking_history = SmokingHistory::from_code(code).unwrap();
            assert!(analyze_risk_factors(&record).is_empty());
        }
    }

    #[test]
    fn heart_disease_alone_is_high() {
        let mut record = healthy_record();
        record.heart_disease = Flag::Present;
        let factors = analyze_risk_factors(&record);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].risk, RiskSeverity::High);
    }

    #[test]
    fn serializes_with_lowercase_risk() {
        let factors = analyze_risk_factors(&high_risk_record());
        let json = serde_json::to_value(&factors[0]).unwrap();
        assert_eq!(json["factor"], "Age");
        assert_eq!(json["risk"], "elevated");
        assert_eq!(json["value"], "60.0 years");
    }
}
