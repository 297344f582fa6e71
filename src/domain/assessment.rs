//! Assessment result types.
//!
//! `RiskResult` is the immutable output of the scorer; `Assessment` is the
//! persisted record handed to storage and the history view.

use serde::{Deserialize, Serialize};

use super::HealthProfile;

/// Ordered risk classification derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
    Critical,
}

impl RiskTier {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very low risk - Maintain current healthy lifestyle",
            Self::Low => "Low risk - Continue preventive care",
            Self::Moderate => "Moderate risk - Medical consultation recommended",
            Self::High => "High risk - Consultation within one week advised",
            Self::VeryHigh => "Very high risk - Urgent consultation advised",
            Self::Critical => "Critical risk - Seek immediate medical attention",
        }
    }

    /// Stable identifier for storage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
            Self::Critical => "critical",
        }
    }

    /// Parse a stored identifier. Unrecognized values map to `Moderate`.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "very_low" => Self::VeryLow,
            "low" => Self::Low,
            "moderate" => Self::Moderate,
            "high" => Self::High,
            "very_high" => Self::VeryHigh,
            "critical" => Self::Critical,
            _ => Self::Moderate,
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::VeryLow => (16, 185, 129),  // Emerald (#10B981)
            Self::Low => (45, 212, 191),      // Teal (#2DD4BF)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::High => (249, 115, 22),     // Orange (#F97316)
            Self::VeryHigh => (244, 63, 94),  // Rose (#F43F5E)
            Self::Critical => (225, 29, 72),  // Deep rose (#E11D48)
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryLow => write!(f, "VERY LOW"),
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::VeryHigh => write!(f, "VERY HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// One rule's weighted contribution to the total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    /// Stable rule name (e.g. "age", "hypertension")
    pub factor: String,

    /// Configured weight of the rule
    pub weight: f64,

    /// Weighted contribution to the total score
    pub contribution: f64,
}

/// Immutable result of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Accumulated score, clamped to [0, 1]
    pub score: f64,

    /// Tier derived from the score via the fixed cutoff table
    pub tier: RiskTier,

    /// Rules with a non-zero contribution, in fixed rule order
    pub contributing_factors: Vec<FactorContribution>,
}

/// Complete assessment record including metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// Optional reference to the assessed subject
    pub subject_id: Option<String>,

    /// The questionnaire input
    pub profile: HealthProfile,

    /// The scoring result
    pub result: RiskResult,

    /// Narrative risk factors present in the profile
    pub risk_factors: Vec<String>,

    /// Personalized recommendations
    pub recommendations: Vec<String>,

    /// Timestamp of assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment record.
    #[must_use]
    pub fn new(
        profile: HealthProfile,
        result: RiskResult,
        risk_factors: Vec<String>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            id: uuid_v4(),
            subject_id: None,
            profile,
            result,
            risk_factors,
            recommendations,
            created_at: chrono::Utc::now(),
        }
    }

    /// Create an assessment with a subject reference.
    #[must_use]
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }
}

/// Generate a simple UUID v4 (random) using a CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so identifiers are not
/// predictable across platforms.
pub(crate) fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(RiskTier::VeryLow < RiskTier::Low);
        assert!(RiskTier::High < RiskTier::Critical);
    }

    #[test]
    fn test_tier_storage_roundtrip() {
        for tier in [
            RiskTier::VeryLow,
            RiskTier::Low,
            RiskTier::Moderate,
            RiskTier::High,
            RiskTier::VeryHigh,
            RiskTier::Critical,
        ] {
            assert_eq!(RiskTier::from_str_lossy(tier.as_str()), tier);
        }
        assert_eq!(RiskTier::from_str_lossy("garbage"), RiskTier::Moderate);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
