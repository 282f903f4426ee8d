//! Recommendation generation. Fixed advice texts, included by rule; the
//! sequence below is the order the form renders them in.

use crate::models::{PatientRecord, Prediction, Priority, Recommendation};

use super::risk_factors::{BMI_OBESE, BMI_OVERWEIGHT, HBA1C_PREDIABETES};

const CONSULT_PROVIDER: Recommendation = Recommendation {
    icon: "fas fa-user-md",
    title: "Consult Healthcare Provider",
    description: "Schedule an appointment with your doctor for comprehensive diabetes evaluation and management plan.",
    priority: Priority::High,
};

const BLOOD_SUGAR_MONITORING: Recommendation = Recommendation {
    icon: "fas fa-chart-line",
    title: "Blood Sugar Monitoring",
    description: "Regular monitoring of blood glucose levels and HbA1c. Consider continuous glucose monitoring.",
    priority: Priority::High,
};

const PHYSICAL_ACTIVITY: Recommendation = Recommendation {
    icon: "fas fa-running",
    title: "Regular Physical Activity",
    description: "Aim for 150 minutes of moderate aerobic activity weekly plus strength training exercises.",
    priority: Priority::Medium,
};

const HEALTHY_DIET: Recommendation = Recommendation {
    icon: "fas fa-apple-alt",
    title: "Healthy Diet",
    description: "Follow a balanced diet rich in vegetables, lean proteins, and whole grains. Limit processed foods and sugar.",
    priority: Priority::Medium,
};

const QUIT_SMOKING: Recommendation = Recommendation {
    icon: "fas fa-ban",
    title: "Quit Smoking",
    description: "Smoking cessation significantly reduces diabetes risk and improves overall health outcomes.",
    priority: Priority::High,
};

const STRESS_MANAGEMENT: Recommendation = Recommendation {
    icon: "fas fa-meditation",
    title: "Stress Management",
    description: "Practice stress-reduction techniques like meditation, yoga, or regular relaxation exercises.",
    priority: Priority::Low,
};

fn weight_management(priority: Priority) -> Recommendation {
    Recommendation {
        icon: "fas fa-weight",
        title: "Weight Management",
        description: "Focus on gradual weight loss through balanced diet and regular exercise. Target 5-10% weight reduction.",
        priority,
    }
}

/// Build the recommendation list for one record and its prediction.
pub fn generate_recommendations(
    record: &PatientRecord,
    prediction: Prediction,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(7);

    if prediction == Prediction::Diabetes {
        recommendations.push(CONSULT_PROVIDER);
    }

    if record.bmi >= BMI_OVERWEIGHT {
        recommendations.push(weight_management(if record.bmi >= BMI_OBESE {
            Priority::High
        } else {
            Priority::Medium
        }));
    }

    if record.hba1c >= HBA1C_PREDIABETES {
        recommendations.push(BLOOD_SUGAR_MONITORING);
    }

    recommendations.push(PHYSICAL_ACTIVITY);
    recommendations.push(HEALTHY_DIET);

    if record.smoking_history.is_risk() {
        recommendations.push(QUIT_SMOKING);
    }

    recommendations.push(STRESS_MANAGEMENT);

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patient::tests::{healthy_record, high_risk_record};

    fn titles(recs: &[Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.title).collect()
    }

    #[test]
    fn baseline_recommendations_always_present() {
        let recs = generate_recommendations(&healthy_record(), Prediction::NoDiabetes);
        assert_eq!(
            titles(&recs),
            vec!["Regular Physical Activity", "Healthy Diet", "Stress Management"]
        );

        let recs = generate_recommendations(&high_risk_record(), Prediction::Diabetes);
        for title in ["Regular Physical Activity", "Healthy Diet", "Stress Management"] {
            assert!(titles(&recs).contains(&title), "missing {title}");
        }
    }

    #[test]
    fn positive_prediction_leads_with_provider_consult() {
        let recs = generate_recommendations(&healthy_record(), Prediction::Diabetes);
        assert_eq!(recs[0].title, "Consult Healthcare Provider");
        assert_eq!(recs[0].priority, Priority::High);
    }

    #[test]
    fn full_sequence_for_high_risk_record() {
        let recs = generate_recommendations(&high_risk_record(), Prediction::Diabetes);
        assert_eq!(
            titles(&recs),
            vec![
                "Consult Healthcare Provider",
                "Weight Management",
                "Blood Sugar Monitoring",
                "Regular Physical Activity",
                "Healthy Diet",
                "Quit Smoking",
                "Stress Management",
            ]
        );
        let priorities: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(
            priorities,
            vec![
                Priority::High,
                Priority::High,
                Priority::High,
                Priority::Medium,
                Priority::Medium,
                Priority::High,
                Priority::Low,
            ]
        );
    }

    #[test]
    fn overweight_gets_medium_weight_priority() {
        let mut record = healthy_record();
        record.bmi = 27.5;
        let recs = generate_recommendations(&record, Prediction::NoDiabetes);
        assert_eq!(recs[0].title, "Weight Management");
        assert_eq!(recs[0].priority, Priority::Medium);
    }

    #[test]
    fn prediction_does_not_drive_other_rules() {
        let negative = generate_recommendations(&high_risk_record(), Prediction::NoDiabetes);
        let positive = generate_recommendations(&high_risk_record(), Prediction::Diabetes);
        assert_eq!(negative.len() + 1, positive.len());
        assert_eq!(negative[..], positive[1..]);
    }

    #[test]
    fn serializes_icon_and_priority() {
        let recs = generate_recommendations(&healthy_record(), Prediction::NoDiabetes);
        let json = serde_json::to_value(&recs[2]).unwrap();
        assert_eq!(json["icon"], "fas fa-meditation");
        assert_eq!(json["priority"], "low");
    }
}
