//! Health questionnaire input types.
//!
//! Field set matches the stroke-prediction dataset the rule table was
//! calibrated against (age, hypertension, heart disease, glucose, BMI,
//! smoking status, plus demographic fields).

use serde::{Deserialize, Serialize};

/// Gender as reported on the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "female" => Some(Self::Female),
            "male" => Some(Self::Male),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Employment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    Children,
    GovernmentJob,
    NeverWorked,
    Private,
    SelfEmployed,
}

impl WorkType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Children => "children",
            Self::GovernmentJob => "government",
            Self::NeverWorked => "never_worked",
            Self::Private => "private",
            Self::SelfEmployed => "self_employed",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "children" => Some(Self::Children),
            "government" | "govt_job" => Some(Self::GovernmentJob),
            "never_worked" => Some(Self::NeverWorked),
            "private" => Some(Self::Private),
            "self_employed" | "self-employed" => Some(Self::SelfEmployed),
            _ => None,
        }
    }
}

/// Urban or rural residence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResidenceType {
    Rural,
    Urban,
}

impl ResidenceType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rural => "rural",
            Self::Urban => "urban",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rural" => Some(Self::Rural),
            "urban" => Some(Self::Urban),
            _ => None,
        }
    }
}

/// Smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingStatus {
    NeverSmoked,
    FormerlySmoked,
    Smokes,
    Unknown,
}

impl SmokingStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeverSmoked => "never_smoked",
            Self::FormerlySmoked => "formerly_smoked",
            Self::Smokes => "smokes",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "never_smoked" | "never smoked" => Some(Self::NeverSmoked),
            "formerly_smoked" | "formerly smoked" => Some(Self::FormerlySmoked),
            "smokes" => Some(Self::Smokes),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Validated questionnaire input for one assessment.
///
/// All fields must be present and within range before the profile reaches
/// the scorer; `validate()` enforces the numeric ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Age in years (0-120)
    pub age: f64,

    pub gender: Gender,

    /// Diagnosed hypertension
    pub hypertension: bool,

    /// Diagnosed heart disease
    pub heart_disease: bool,

    pub ever_married: bool,

    pub work_type: WorkType,

    pub residence_type: ResidenceType,

    /// Average glucose level in mg/dL (50-500)
    pub avg_glucose_level: f64,

    /// Body mass index (10-60)
    pub bmi: f64,

    pub smoking_status: SmokingStatus,
}

/// Valid range for age in years.
pub const AGE_RANGE: (f64, f64) = (0.0, 120.0);
/// Valid range for average glucose in mg/dL.
pub const GLUCOSE_RANGE: (f64, f64) = (50.0, 500.0);
/// Valid range for BMI.
pub const BMI_RANGE: (f64, f64) = (10.0, 60.0);

impl HealthProfile {
    /// Validate that all numeric fields are within their documented ranges.
    ///
    /// # Errors
    /// Returns all range violations as a vector of messages.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&self.age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                self.age, AGE_RANGE.0, AGE_RANGE.1
            ));
        }
        if !(GLUCOSE_RANGE.0..=GLUCOSE_RANGE.1).contains(&self.avg_glucose_level) {
            errors.push(format!(
                "Glucose {} out of range [{}, {}]",
                self.avg_glucose_level, GLUCOSE_RANGE.0, GLUCOSE_RANGE.1
            ));
        }
        if !(BMI_RANGE.0..=BMI_RANGE.1).contains(&self.bmi) {
            errors.push(format!(
                "BMI {} out of range [{}, {}]",
                self.bmi, BMI_RANGE.0, BMI_RANGE.1
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> HealthProfile {
        HealthProfile {
            age: 55.0,
            gender: Gender::Female,
            hypertension: true,
            heart_disease: false,
            ever_married: true,
            work_type: WorkType::Private,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 110.0,
            bmi: 27.5,
            smoking_status: SmokingStatus::NeverSmoked,
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fields() {
        let mut profile = sample_profile();
        profile.age = 130.0;
        profile.avg_glucose_level = 20.0;
        profile.bmi = 5.0;

        let errors = profile.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("Age"));
    }

    #[test]
    fn test_categorical_roundtrip() {
        for work in [
            WorkType::Children,
            WorkType::GovernmentJob,
            WorkType::NeverWorked,
            WorkType::Private,
            WorkType::SelfEmployed,
        ] {
            assert_eq!(WorkType::parse(work.as_str()), Some(work));
        }
        assert_eq!(WorkType::parse("Self-employed"), Some(WorkType::SelfEmployed));
        assert_eq!(SmokingStatus::parse("never smoked"), Some(SmokingStatus::NeverSmoked));
        assert!(Gender::parse("unknown").is_none());
    }
}
