//! Analytics service: Aggregate statistics over stored assessments.

use std::sync::Arc;

use crate::domain::RiskTier;
use crate::ports::Storage;
use crate::StrokeguardError;

/// Aggregate view of the stored assessment history.
#[derive(Debug, Clone, Default)]
pub struct RiskSummary {
    /// Total number of assessments
    pub total: usize,

    /// Mean risk score across all assessments
    pub avg_score: f64,

    /// Counts per tier, ordered VeryLow..Critical
    pub tier_counts: [usize; 6],

    /// Share of assessments at High tier or above
    pub high_rate: f64,
}

impl RiskSummary {
    /// Count for a specific tier.
    #[must_use]
    pub fn count_for(&self, tier: RiskTier) -> usize {
        self.tier_counts[tier as usize]
    }
}

/// Service computing aggregate statistics.
pub struct AnalyticsService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> AnalyticsService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new analytics service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Compute the aggregate summary over all stored assessments.
    ///
    /// # Errors
    /// Returns error if storage fails.
    pub fn summary(&self) -> Result<RiskSummary, StrokeguardError> {
        let assessments = self
            .storage
            .load_assessments()
            .map_err(|e| StrokeguardError::Storage(e.into()))?;

        let mut summary = RiskSummary {
            total: assessments.len(),
            ..RiskSummary::default()
        };

        if assessments.is_empty() {
            return Ok(summary);
        }

        let mut score_sum = 0.0;
        let mut high_or_above = 0usize;
        for assessment in &assessments {
            score_sum += assessment.result.score;
            summary.tier_counts[assessment.result.tier as usize] += 1;
            if assessment.result.tier >= RiskTier::High {
                high_or_above += 1;
            }
        }

        summary.avg_score = score_sum / assessments.len() as f64;
        summary.high_rate = high_or_above as f64 / assessments.len() as f64;

        tracing::info!(
            "Computed analytics summary: total={}, avg_score={:.4}, high_rate={:.1}%",
            summary.total,
            summary.avg_score,
            summary.high_rate * 100.0
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::application::AssessmentService;
    use crate::domain::{
        Gender, HealthProfile, ResidenceType, SmokingStatus, WorkType,
    };

    fn services() -> (AssessmentService<SqliteStorage>, AnalyticsService<SqliteStorage>) {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        (
            AssessmentService::new(storage.clone()),
            AnalyticsService::new(storage),
        )
    }

    fn healthy() -> HealthProfile {
        HealthProfile {
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
        }
    }

    fn critical() -> HealthProfile {
        HealthProfile {
            age: 85.0,
            gender: Gender::Male,
            hypertension: true,
            heart_disease: true,
            ever_married: true,
            work_type: WorkType::SelfEmployed,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 280.0,
            bmi: 42.0,
            smoking_status: SmokingStatus::Smokes,
        }
    }

    #[test]
    fn test_empty_summary() {
        let (_, analytics) = services();
        let summary = analytics.summary().expect("Should summarize");

        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_score, 0.0);
        assert_eq!(summary.high_rate, 0.0);
    }

    #[test]
    fn test_summary_counts_tiers() {
        let (assessments, analytics) = services();

        assessments
            .run_assessment(healthy(), None)
            .expect("Should assess");
        assessments
            .run_assessment(critical(), None)
            .expect("Should assess");

        let summary = analytics.summary().expect("Should summarize");
        assert_eq!(summary.total, 2);
        assert_eq!(summary.count_for(RiskTier::VeryLow), 1);
        assert_eq!(summary.count_for(RiskTier::Critical), 1);
        assert!((summary.high_rate - 0.5).abs() < f64::EPSILON);
        assert!(summary.avg_score > 0.0 && summary.avg_score < 1.0);
    }
}
