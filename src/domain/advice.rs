//! Narrative risk factors and personalized recommendations.
//!
//! These are presentation-oriented derivations from a profile and its tier;
//! they do not feed back into the score.

use super::{Gender, HealthProfile, ResidenceType, RiskTier, SmokingStatus, WorkType};

/// Human-readable risk factors present in the profile, in fixed order.
#[must_use]
pub fn risk_narratives(profile: &HealthProfile) -> Vec<String> {
    let mut factors = Vec::new();

    if profile.age >= 80.0 {
        factors.push("Very advanced age (>=80 years) - Critical Risk".to_string());
    } else if profile.age >= 70.0 {
        factors.push("Advanced age (70-79 years) - High Risk".to_string());
    } else if profile.age >= 60.0 {
        factors.push("Mature age (60-69 years) - Moderate Risk".to_string());
    } else if profile.age >= 50.0 {
        factors.push("Middle age (50-59 years) - Low Risk".to_string());
    }

    if profile.hypertension {
        factors.push("Hypertension - High Risk".to_string());
    }
    if profile.heart_disease {
        factors.push("Heart disease - High Risk".to_string());
    }

    let glucose = profile.avg_glucose_level;
    if glucose >= 250.0 {
        factors.push("Severely elevated glucose (>=250 mg/dL) - Critical Risk".to_string());
    } else if glucose >= 180.0 {
        factors.push("Poorly controlled diabetes (180-249 mg/dL) - High Risk".to_string());
    } else if glucose >= 126.0 {
        factors.push("Diabetes (126-179 mg/dL) - Moderate Risk".to_string());
    } else if glucose >= 100.0 {
        factors.push("Pre-diabetes (100-125 mg/dL) - Low Risk".to_string());
    }

    let bmi = profile.bmi;
    if bmi >= 40.0 {
        factors.push("Severe obesity (BMI >=40) - Critical Risk".to_string());
    } else if bmi >= 35.0 {
        factors.push("Moderate obesity (BMI 35-39.9) - High Risk".to_string());
    } else if bmi >= 30.0 {
        factors.push("Obesity (BMI 30-34.9) - Moderate Risk".to_string());
    } else if bmi >= 25.0 {
        factors.push("Overweight (BMI 25-29.9) - Low Risk".to_string());
    } else if bmi < 18.5 {
        factors.push("Underweight (BMI <18.5) - Low Risk".to_string());
    }

    match profile.smoking_status {
        SmokingStatus::Smokes => {
            factors.push("Current smoker - Critical Risk".to_string());
        }
        SmokingStatus::FormerlySmoked => {
            factors.push("Former smoker - Moderate Risk".to_string());
        }
        SmokingStatus::Unknown => {
            factors.push("Unknown smoking status - Low Risk".to_string());
        }
        SmokingStatus::NeverSmoked => {}
    }

    match profile.work_type {
        WorkType::SelfEmployed => {
            factors.push("Self-employed work - Moderate Risk".to_string());
        }
        WorkType::Private => {
            factors.push("Private sector work - Low Risk".to_string());
        }
        _ => {}
    }

    if profile.gender == Gender::Male {
        factors.push("Male gender - Low Risk".to_string());
    }
    if profile.residence_type == ResidenceType::Urban {
        factors.push("Urban residence - Low Risk".to_string());
    }

    factors
}

/// Personalized recommendations for a tier and profile.
#[must_use]
pub fn recommendations(tier: RiskTier, profile: &HealthProfile) -> Vec<String> {
    let mut recs: Vec<String> = match tier {
        RiskTier::VeryLow => vec![
            "Maintain current healthy lifestyle",
            "Annual health check-ups recommended",
            "Continue regular physical activity",
            "Maintain balanced diet",
        ],
        RiskTier::Low => vec![
            "Continue preventive care measures",
            "Monitor blood pressure quarterly",
            "Maintain healthy diet and exercise routine",
            "Consider lifestyle optimization",
        ],
        RiskTier::Moderate => vec![
            "Schedule medical consultation within 2-4 weeks",
            "Monitor blood pressure monthly",
            "Implement structured exercise program",
            "Consider dietary consultation",
        ],
        RiskTier::High => vec![
            "Schedule medical consultation within 1 week",
            "Monitor blood pressure weekly",
            "Implement immediate lifestyle changes",
            "Consider cardiovascular screening",
        ],
        RiskTier::VeryHigh => vec![
            "URGENT: Schedule medical consultation within 2-3 days",
            "Daily blood pressure monitoring",
            "Immediate lifestyle intervention required",
            "Comprehensive cardiovascular assessment needed",
        ],
        RiskTier::Critical => vec![
            "CRITICAL: Seek immediate medical attention (within 24 hours)",
            "Continuous health monitoring required",
            "Emergency action plan needed",
            "Immediate specialist referral recommended",
        ],
    }
    .into_iter()
    .map(String::from)
    .collect();

    if profile.hypertension {
        recs.push("Follow prescribed hypertension medication regimen strictly".to_string());
    }
    if profile.heart_disease {
        recs.push("Cardiology follow-up and medication compliance essential".to_string());
    }

    let glucose = profile.avg_glucose_level;
    if glucose >= 250.0 {
        recs.push("URGENT: Immediate diabetes management required".to_string());
    } else if glucose >= 126.0 {
        recs.push("Diabetes management and glucose monitoring essential".to_string());
    } else if glucose >= 100.0 {
        recs.push("Pre-diabetes management - lifestyle changes recommended".to_string());
    }

    let bmi = profile.bmi;
    if bmi >= 35.0 {
        recs.push("Urgent weight management - consider bariatric consultation".to_string());
    } else if bmi >= 30.0 {
        recs.push("Weight management program recommended".to_string());
    } else if bmi >= 25.0 {
        recs.push("Gradual weight reduction through diet and exercise".to_string());
    }

    match profile.smoking_status {
        SmokingStatus::Smokes => {
            recs.push(
                "CRITICAL: Immediate smoking cessation required - seek professional help"
                    .to_string(),
            );
        }
        SmokingStatus::FormerlySmoked => {
            recs.push("Continue smoke-free lifestyle - avoid relapse triggers".to_string());
        }
        _ => {}
    }

    if profile.age >= 70.0 {
        recs.push("Regular geriatric health assessments recommended".to_string());
    } else if profile.age >= 60.0 {
        recs.push("Enhanced preventive care for mature adults".to_string());
    }

    if tier >= RiskTier::High {
        recs.push("Learn F.A.S.T. stroke warning signs: Face, Arms, Speech, Time".to_string());
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Gender, ResidenceType, SmokingStatus, WorkType};

    fn profile() -> HealthProfile {
        HealthProfile {
            age: 72.0,
            gender: Gender::Male,
            hypertension: true,
            heart_disease: false,
            ever_married: true,
            work_type: WorkType::SelfEmployed,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 165.0,
            bmi: 32.0,
            smoking_status: SmokingStatus::FormerlySmoked,
        }
    }

    #[test]
    fn test_narratives_reflect_profile() {
        let narratives = risk_narratives(&profile());
        assert!(narratives[0].contains("Advanced age"));
        assert!(narratives.iter().any(|n| n.contains("Hypertension")));
        assert!(narratives.iter().any(|n| n.contains("Diabetes (126-179")));
        assert!(narratives.iter().any(|n| n.contains("Obesity (BMI 30-34.9)")));
        assert!(narratives.iter().any(|n| n.contains("Former smoker")));
        assert!(!narratives.iter().any(|n| n.contains("Heart disease")));
    }

    #[test]
    fn test_healthy_profile_has_no_narratives() {
        let healthy = HealthProfile {
            age: 25.0,
            gender: Gender::Female,
            hypertension: false,
            heart_disease: false,
            ever_married: false,
            work_type: WorkType::GovernmentJob,
            residence_type: ResidenceType::Rural,
            avg_glucose_level: 85.0,
            bmi: 22.5,
            smoking_status: SmokingStatus::NeverSmoked,
        };
        assert!(risk_narratives(&healthy).is_empty());
    }

    #[test]
    fn test_high_tier_includes_stroke_signs() {
        let recs = recommendations(RiskTier::High, &profile());
        assert!(recs.iter().any(|r| r.contains("F.A.S.T.")));

        let low_recs = recommendations(RiskTier::Low, &profile());
        assert!(!low_recs.iter().any(|r| r.contains("F.A.S.T.")));
    }

    #[test]
    fn test_condition_specific_recommendations() {
        let recs = recommendations(RiskTier::VeryHigh, &profile());
        assert!(recs.iter().any(|r| r.contains("hypertension medication")));
        assert!(recs.iter().any(|r| r.contains("glucose monitoring")));
        assert!(recs.iter().any(|r| r.contains("Weight management program")));
        assert!(recs.iter().any(|r| r.contains("geriatric")));
    }
}
