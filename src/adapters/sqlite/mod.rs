//! SQLite adapter: Implementation of Storage.
//!
//! Provides local persistence for assessment records.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex (from panic
//! in another thread) will cause panic. This fail-fast behavior is intentional
//! for data integrity in healthcare applications.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, Row};

use crate::domain::{
    Assessment, Gender, HealthProfile, ResidenceType, RiskResult, RiskTier, SmokingStatus,
    WorkType,
};
use crate::ports::{AssessmentPage, Storage};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// SQLite storage adapter.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                subject_id TEXT,
                age REAL NOT NULL,
                gender TEXT NOT NULL,
                hypertension INTEGER NOT NULL,
                heart_disease INTEGER NOT NULL,
                ever_married INTEGER NOT NULL,
                work_type TEXT NOT NULL,
                residence_type TEXT NOT NULL,
                avg_glucose_level REAL NOT NULL,
                bmi REAL NOT NULL,
                smoking_status TEXT NOT NULL,
                score REAL NOT NULL,
                tier TEXT NOT NULL,
                contributing_factors TEXT NOT NULL,
                risk_factors TEXT NOT NULL,
                recommendations TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_created
                ON assessments(created_at DESC);
            ",
        )?;

        Ok(())
    }
}

const SELECT_COLUMNS: &str = r"
    SELECT id, subject_id, age, gender, hypertension, heart_disease,
           ever_married, work_type, residence_type, avg_glucose_level, bmi,
           smoking_status, score, tier, contributing_factors, risk_factors,
           recommendations, created_at
    FROM assessments
";

fn json_error(index: usize, e: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
}

/// Reconstruct an assessment from a row in `SELECT_COLUMNS` order.
///
/// Categorical columns are parsed leniently: unrecognized values fall back
/// to a neutral variant instead of failing the whole history query.
fn row_to_assessment(row: &Row<'_>) -> rusqlite::Result<Assessment> {
    let id: String = row.get(0)?;
    let subject_id: Option<String> = row.get(1)?;
    let age: f64 = row.get(2)?;
    let gender: String = row.get(3)?;
    let hypertension: i64 = row.get(4)?;
    let heart_disease: i64 = row.get(5)?;
    let ever_married: i64 = row.get(6)?;
    let work_type: String = row.get(7)?;
    let residence_type: String = row.get(8)?;
    let avg_glucose_level: f64 = row.get(9)?;
    let bmi: f64 = row.get(10)?;
    let smoking_status: String = row.get(11)?;
    let score: f64 = row.get(12)?;
    let tier: String = row.get(13)?;
    let contributing_factors: String = row.get(14)?;
    let risk_factors: String = row.get(15)?;
    let recommendations: String = row.get(16)?;
    let created_at_str: String = row.get(17)?;

    let profile = HealthProfile {
        age,
        gender: Gender::parse(&gender).unwrap_or(Gender::Other),
        hypertension: hypertension != 0,
        heart_disease: heart_disease != 0,
        ever_married: ever_married != 0,
        work_type: WorkType::parse(&work_type).unwrap_or(WorkType::Private),
        residence_type: ResidenceType::parse(&residence_type).unwrap_or(ResidenceType::Urban),
        avg_glucose_level,
        bmi,
        smoking_status: SmokingStatus::parse(&smoking_status).unwrap_or(SmokingStatus::Unknown),
    };

    let result = RiskResult {
        score,
        tier: RiskTier::from_str_lossy(&tier),
        contributing_factors: serde_json::from_str(&contributing_factors)
            .map_err(|e| json_error(14, e))?,
    };

    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now());

    Ok(Assessment {
        id,
        subject_id,
        profile,
        result,
        risk_factors: serde_json::from_str(&risk_factors).map_err(|e| json_error(15, e))?,
        recommendations: serde_json::from_str(&recommendations).map_err(|e| json_error(16, e))?,
        created_at,
    })
}

impl Storage for SqliteStorage {
    type Error = StorageError;

    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error> {
        let contributing_factors = serde_json::to_string(&assessment.result.contributing_factors)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let risk_factors = serde_json::to_string(&assessment.risk_factors)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let recommendations = serde_json::to_string(&assessment.recommendations)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let conn = self.conn.lock().expect("Lock failed");
        let profile = &assessment.profile;

        conn.execute(
            r"
            INSERT INTO assessments (
                id, subject_id, age, gender, hypertension, heart_disease,
                ever_married, work_type, residence_type, avg_glucose_level, bmi,
                smoking_status, score, tier, contributing_factors, risk_factors,
                recommendations, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            ",
            params![
                assessment.id,
                assessment.subject_id,
                profile.age,
                profile.gender.as_str(),
                profile.hypertension as i64,
                profile.heart_disease as i64,
                profile.ever_married as i64,
                profile.work_type.as_str(),
                profile.residence_type.as_str(),
                profile.avg_glucose_level,
                profile.bmi,
                profile.smoking_status.as_str(),
                assessment.result.score,
                assessment.result.tier.as_str(),
                contributing_factors,
                risk_factors,
                recommendations,
                assessment.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Saved assessment {} to storage", assessment.id);
        Ok(())
    }

    fn load_assessments(&self) -> Result<Vec<Assessment>, Self::Error> {
        // Analytics aggregate over every stored row, so no LIMIT here.
        // Interactive views use load_recent_assessments/paginated instead.
        let conn = self.conn.lock().expect("Lock failed");

        let query = format!("{SELECT_COLUMNS} ORDER BY created_at DESC");
        let mut stmt = conn.prepare(&query)?;

        let assessments = stmt
            .query_map([], row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assessments)
    }

    fn load_recent_assessments(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let query = format!("{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1");
        let mut stmt = conn.prepare(&query)?;

        let assessments = stmt
            .query_map(params![limit as i64], row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assessments)
    }

    fn load_assessments_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<AssessmentPage, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        let query = format!("{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1 OFFSET ?2");
        let mut stmt = conn.prepare(&query)?;

        let assessments = stmt
            .query_map(params![limit as i64, offset as i64], row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AssessmentPage::new(
            assessments,
            total_count as usize,
            offset,
            limit,
        ))
    }

    fn count_assessments(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn delete_assessment(&self, id: &str) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let affected = conn.execute("DELETE FROM assessments WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM assessments", [])?;
        tracing::warn!("Cleared all assessments from storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskScorer;

    fn sample_assessment() -> Assessment {
        let profile = HealthProfile {
            age: 65.0,
            gender: Gender::Female,
            hypertension: true,
            heart_disease: false,
            ever_married: true,
            work_type: WorkType::Private,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 140.0,
            bmi: 28.0,
            smoking_status: SmokingStatus::NeverSmoked,
        };
        let result = RiskScorer::new().score(&profile);
        let risk_factors = crate::domain::advice::risk_narratives(&profile);
        let recommendations = crate::domain::advice::recommendations(result.tier, &profile);
        Assessment::new(profile, result, risk_factors, recommendations)
    }

    #[test]
    fn test_assessment_crud() {
        let storage = SqliteStorage::in_memory().expect("Should create db");

        assert_eq!(storage.count_assessments().expect("Should count"), 0);

        let assessment = sample_assessment();
        let id = assessment.id.clone();

        storage.save_assessment(&assessment).expect("Should save");
        assert_eq!(storage.count_assessments().expect("Should count"), 1);

        let loaded = storage.load_assessments().expect("Should load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, id);

        storage.delete_assessment(&id).expect("Should delete");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);
    }

    #[test]
    fn test_roundtrip_preserves_result() {
        let storage = SqliteStorage::in_memory().expect("Should create db");

        let assessment = sample_assessment();
        storage.save_assessment(&assessment).expect("Should save");

        let loaded = storage
            .load_recent_assessments(1)
            .expect("Should load")
            .pop()
            .expect("Should exist");

        assert_eq!(loaded.profile, assessment.profile);
        assert_eq!(loaded.result, assessment.result);
        assert_eq!(loaded.risk_factors, assessment.risk_factors);
        assert_eq!(loaded.recommendations, assessment.recommendations);
    }

    #[test]
    fn test_delete_missing_assessment() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let err = storage.delete_assessment("no-such-id").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn test_load_assessments_is_unbounded() {
        let storage = SqliteStorage::in_memory().expect("Should create db");

        let total = 1001;
        for _ in 0..total {
            storage
                .save_assessment(&sample_assessment())
                .expect("Should save");
        }

        let loaded = storage.load_assessments().expect("Should load");
        assert_eq!(loaded.len(), total);
        assert_eq!(storage.count_assessments().expect("Should count"), total);
    }

    #[test]
    fn test_clear_all() {
        let storage = SqliteStorage::in_memory().expect("Should create db");

        for _ in 0..3 {
            storage
                .save_assessment(&sample_assessment())
                .expect("Should save");
        }

        storage.clear_all().expect("Should clear");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);
    }

    #[test]
    fn test_pagination() {
        let storage = SqliteStorage::in_memory().expect("Should create db");

        for _ in 0..5 {
            storage
                .save_assessment(&sample_assessment())
                .expect("Should save");
        }

        let page = storage
            .load_assessments_paginated(0, 2)
            .expect("Should load page");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert!(page.has_more);
        assert_eq!(page.next_offset(), Some(2));
        assert_eq!(page.prev_offset(), None);

        let last = storage
            .load_assessments_paginated(4, 2)
            .expect("Should load page");
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_more);
        assert_eq!(last.prev_offset(), Some(2));
    }
}
