//! Assessment service: Orchestrates the scoring pipeline.
//!
//! This service coordinates:
//! - Server-side profile validation
//! - Risk scoring
//! - Narrative/recommendation derivation
//! - Storage persistence

use std::sync::Arc;

use crate::domain::{advice, Assessment, HealthProfile, RiskScorer};
use crate::ports::{AssessmentPage, Storage};
use crate::StrokeguardError;

/// Service for running risk assessments.
pub struct AssessmentService<S>
where
    S: Storage,
{
    scorer: RiskScorer,
    storage: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new assessment service.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            scorer: RiskScorer::new(),
            storage,
        }
    }

    /// Run a full assessment on a health profile.
    ///
    /// Performs the pipeline:
    /// 1. Validate the profile (client input is re-checked server-side)
    /// 2. Score it
    /// 3. Derive narratives and recommendations
    /// 4. Persist the assessment
    ///
    /// A persistence failure is logged but does not discard the result.
    ///
    /// # Errors
    /// Returns `Validation` if the profile is out of range.
    pub fn run_assessment(
        &self,
        profile: HealthProfile,
        subject_id: Option<String>,
    ) -> Result<Assessment, StrokeguardError> {
        profile
            .validate()
            .map_err(|errors| StrokeguardError::Validation(errors.join(", ")))?;

        tracing::debug!("Scoring profile...");
        let result = self.scorer.score(&profile);
        let risk_factors = advice::risk_narratives(&profile);
        let recommendations = advice::recommendations(result.tier, &profile);

        let mut assessment = Assessment::new(profile, result, risk_factors, recommendations);
        if let Some(subject_id) = subject_id {
            assessment = assessment.with_subject(subject_id);
        }

        if let Err(e) = self.storage.save_assessment(&assessment) {
            let e: crate::adapters::StorageError = e.into();
            tracing::warn!("Failed to save assessment: {}", e);
        }

        tracing::info!(
            "Assessment complete: score={:.4}, tier={}, factors={}",
            assessment.result.score,
            assessment.result.tier,
            assessment.result.contributing_factors.len()
        );

        Ok(assessment)
    }

    /// Get recent assessments from storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<Assessment>, StrokeguardError> {
        self.storage
            .load_recent_assessments(limit)
            .map_err(|e| StrokeguardError::Storage(e.into()))
    }

    /// Get a page of assessment history.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn history_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<AssessmentPage, StrokeguardError> {
        self.storage
            .load_assessments_paginated(offset, limit)
            .map_err(|e| StrokeguardError::Storage(e.into()))
    }

    /// Get total assessment count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn count(&self) -> Result<usize, StrokeguardError> {
        self.storage
            .count_assessments()
            .map_err(|e| StrokeguardError::Storage(e.into()))
    }

    /// Delete an assessment from history.
    ///
    /// # Errors
    /// Returns error if storage operation fails or the id is unknown.
    pub fn delete(&self, id: &str) -> Result<(), StrokeguardError> {
        self.storage
            .delete_assessment(id)
            .map_err(|e| StrokeguardError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::{Gender, ResidenceType, RiskTier, SmokingStatus, WorkType};

    fn create_test_service() -> AssessmentService<SqliteStorage> {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        AssessmentService::new(storage)
    }

    fn high_risk_profile() -> HealthProfile {
        HealthProfile {
            age: 78.0,
            gender: Gender::Male,
            hypertension: true,
            heart_disease: true,
            ever_married: true,
            work_type: WorkType::SelfEmployed,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 200.0,
            bmi: 35.5,
            smoking_status: SmokingStatus::Smokes,
        }
    }

    #[test]
    fn test_assessment_pipeline() {
        let service = create_test_service();

        let assessment = service
            .run_assessment(high_risk_profile(), None)
            .expect("Should assess");

        assert!(assessment.result.score > 0.85);
        assert_eq!(assessment.result.tier, RiskTier::Critical);
        assert!(!assessment.risk_factors.is_empty());
        assert!(!assessment.recommendations.is_empty());

        // Persisted
        assert_eq!(service.count().expect("Should count"), 1);
        let recent = service.recent(10).expect("Should load");
        assert_eq!(recent[0].id, assessment.id);
    }

    #[test]
    fn test_rejects_invalid_profile() {
        let service = create_test_service();

        let mut profile = high_risk_profile();
        profile.avg_glucose_level = 900.0;

        let err = service.run_assessment(profile, None).unwrap_err();
        assert!(matches!(err, StrokeguardError::Validation(_)));
        assert_eq!(service.count().expect("Should count"), 0);
    }

    #[test]
    fn test_subject_reference() {
        let service = create_test_service();

        let assessment = service
            .run_assessment(high_risk_profile(), Some("subject-42".to_string()))
            .expect("Should assess");

        assert_eq!(assessment.subject_id.as_deref(), Some("subject-42"));
    }

    #[test]
    fn test_delete_from_history() {
        let service = create_test_service();

        let assessment = service
            .run_assessment(high_risk_profile(), None)
            .expect("Should assess");

        service.delete(&assessment.id).expect("Should delete");
        assert_eq!(service.count().expect("Should count"), 0);
    }
}
