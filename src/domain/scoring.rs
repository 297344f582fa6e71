//! Weighted-rule stroke-risk scoring engine.
//!
//! The scorer is a pure function over a validated [`HealthProfile`]: a fixed
//! list of rules, each contributing `weight * multiplier` to the total. The
//! total is clamped to [0, 1] and mapped to a [`RiskTier`] through a fixed
//! cutoff table. No I/O, no logging, no shared state.
//!
//! Weights, bands, and cutoffs are fixed calibration constants; changing
//! them changes every historical comparison, so they live in one place here.

use super::{
    FactorContribution, Gender, HealthProfile, ResidenceType, RiskResult, RiskTier, SmokingStatus,
    WorkType,
};

const WEIGHT_AGE: f64 = 0.20;
const WEIGHT_HYPERTENSION: f64 = 0.18;
const WEIGHT_HEART_DISEASE: f64 = 0.16;
const WEIGHT_GLUCOSE: f64 = 0.14;
const WEIGHT_BMI: f64 = 0.12;
const WEIGHT_SMOKING: f64 = 0.12;
const WEIGHT_WORK_TYPE: f64 = 0.04;
const WEIGHT_RESIDENCE: f64 = 0.02;
const WEIGHT_GENDER: f64 = 0.02;

/// Graduated band: lower edge (inclusive), upper edge (exclusive except for
/// the final band), multiplier.
type Band = (f64, f64, f64);

const AGE_BANDS: &[Band] = &[
    (0.0, 40.0, 0.0),
    (40.0, 50.0, 0.1),
    (50.0, 60.0, 0.3),
    (60.0, 70.0, 0.6),
    (70.0, 80.0, 0.8),
    (80.0, 120.0, 1.0),
];

const GLUCOSE_BANDS: &[Band] = &[
    (0.0, 100.0, 0.0),   // Normal
    (100.0, 126.0, 0.3), // Pre-diabetic
    (126.0, 180.0, 0.6), // Diabetic
    (180.0, 250.0, 0.8), // Poorly controlled
    (250.0, 500.0, 1.0), // Severe
];

const BMI_BANDS: &[Band] = &[
    (0.0, 18.5, 0.1),  // Underweight (slight risk)
    (18.5, 25.0, 0.0), // Normal
    (25.0, 30.0, 0.3), // Overweight
    (30.0, 35.0, 0.6), // Obese class I
    (35.0, 40.0, 0.8), // Obese class II
    (40.0, 60.0, 1.0), // Obese class III
];

/// Tier cutoffs: a score at or below the cutoff maps to that tier,
/// evaluated in ascending order. Above the last cutoff is Critical.
const TIER_CUTOFFS: [(f64, RiskTier); 5] = [
    (0.15, RiskTier::VeryLow),
    (0.30, RiskTier::Low),
    (0.50, RiskTier::Moderate),
    (0.70, RiskTier::High),
    (0.85, RiskTier::VeryHigh),
];

/// Look up the multiplier for a value in a graduated band table.
///
/// Band lower edges are inclusive, so a value exactly at a clinical
/// threshold (e.g. glucose 100) falls into the higher band. Values below
/// the first edge or at/beyond the final edge saturate at the outermost
/// multiplier, keeping the factor score monotone over the whole domain.
fn band_multiplier(bands: &[Band], value: f64) -> f64 {
    let (first_lo, _, first_m) = bands[0];
    if value < first_lo {
        return first_m;
    }
    for &(lo, hi, multiplier) in bands {
        if value >= lo && value < hi {
            return multiplier;
        }
    }
    bands[bands.len() - 1].2
}

fn smoking_multiplier(status: SmokingStatus) -> f64 {
    match status {
        SmokingStatus::NeverSmoked => 0.0,
        SmokingStatus::FormerlySmoked => 0.4,
        SmokingStatus::Smokes => 1.0,
        SmokingStatus::Unknown => 0.2,
    }
}

fn work_type_multiplier(work: WorkType) -> f64 {
    match work {
        WorkType::Children => 0.0,
        WorkType::GovernmentJob => 0.2,
        WorkType::NeverWorked => 0.1,
        WorkType::Private => 0.6,
        WorkType::SelfEmployed => 0.8,
    }
}

fn residence_multiplier(residence: ResidenceType) -> f64 {
    match residence {
        ResidenceType::Rural => 0.0,
        ResidenceType::Urban => 0.5,
    }
}

fn gender_multiplier(gender: Gender) -> f64 {
    match gender {
        Gender::Female => 0.0,
        Gender::Male => 0.6,
        Gender::Other => 0.3,
    }
}

/// Stateless weighted-rule scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Score a validated profile.
    ///
    /// Deterministic: the same profile always produces the same result.
    /// `contributing_factors` lists exactly the rules with a non-zero
    /// contribution, in rule order.
    #[must_use]
    pub fn score(&self, profile: &HealthProfile) -> RiskResult {
        let breakdown = self.breakdown(profile);

        let total: f64 = breakdown.iter().map(|f| f.contribution).sum();
        let score = total.clamp(0.0, 1.0);

        let contributing_factors = breakdown
            .into_iter()
            .filter(|f| f.contribution > 0.0)
            .collect();

        RiskResult {
            score,
            tier: Self::tier_for(score),
            contributing_factors,
        }
    }

    /// Per-rule breakdown for all rules, in rule order, including zero
    /// contributions. Used for visualization.
    #[must_use]
    pub fn breakdown(&self, profile: &HealthProfile) -> Vec<FactorContribution> {
        let binary = |present: bool| if present { 1.0 } else { 0.0 };

        let rules: [(&'static str, f64, f64); 9] = [
            ("age", WEIGHT_AGE, band_multiplier(AGE_BANDS, profile.age)),
            ("hypertension", WEIGHT_HYPERTENSION, binary(profile.hypertension)),
            ("heart_disease", WEIGHT_HEART_DISEASE, binary(profile.heart_disease)),
            (
                "avg_glucose_level",
                WEIGHT_GLUCOSE,
                band_multiplier(GLUCOSE_BANDS, profile.avg_glucose_level),
            ),
            ("bmi", WEIGHT_BMI, band_multiplier(BMI_BANDS, profile.bmi)),
            (
                "smoking_status",
                WEIGHT_SMOKING,
                smoking_multiplier(profile.smoking_status),
            ),
            (
                "work_type",
                WEIGHT_WORK_TYPE,
                work_type_multiplier(profile.work_type),
            ),
            (
                "residence_type",
                WEIGHT_RESIDENCE,
                residence_multiplier(profile.residence_type),
            ),
            ("gender", WEIGHT_GENDER, gender_multiplier(profile.gender)),
        ];

        rules
            .into_iter()
            .map(|(factor, weight, multiplier)| FactorContribution {
                factor: factor.to_string(),
                weight,
                contribution: weight * multiplier,
            })
            .collect()
    }

    /// Map a clamped score to its tier via the fixed cutoff table.
    /// A score exactly at a cutoff maps to the lower tier.
    #[must_use]
    pub fn tier_for(score: f64) -> RiskTier {
        for (cutoff, tier) in TIER_CUTOFFS {
            if score <= cutoff {
                return tier;
            }
        }
        RiskTier::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Gender, ResidenceType, SmokingStatus, WorkType};

    fn baseline() -> HealthProfile {
        HealthProfile {
            age: 30.0,
            gender: Gender::Female,
            hypertension: false,
            heart_disease: false,
            ever_married: false,
            work_type: WorkType::Children,
            residence_type: ResidenceType::Rural,
            avg_glucose_level: 90.0,
            bmi: 22.0,
            smoking_status: SmokingStatus::NeverSmoked,
        }
    }

    #[test]
    fn test_score_within_bounds() {
        let scorer = RiskScorer::new();

        let healthy = scorer.score(&baseline());
        assert!(healthy.score >= 0.0 && healthy.score <= 1.0);

        let worst = HealthProfile {
            age: 90.0,
            gender: Gender::Male,
            hypertension: true,
            heart_disease: true,
            ever_married: true,
            work_type: WorkType::SelfEmployed,
            residence_type: ResidenceType::Urban,
            avg_glucose_level: 300.0,
            bmi: 45.0,
            smoking_status: SmokingStatus::Smokes,
        };
        let result = scorer.score(&worst);
        assert!(result.score >= 0.0 && result.score <= 1.0);
        assert_eq!(result.tier, RiskTier::Critical);
    }

    #[test]
    fn test_determinism() {
        let scorer = RiskScorer::new();
        let profile = HealthProfile {
            age: 67.0,
            hypertension: true,
            avg_glucose_level: 155.0,
            bmi: 31.0,
            smoking_status: SmokingStatus::FormerlySmoked,
            ..baseline()
        };

        assert_eq!(scorer.score(&profile), scorer.score(&profile));
    }

    #[test]
    fn test_age_monotonicity() {
        let scorer = RiskScorer::new();
        let mut previous = f64::NEG_INFINITY;
        let mut age = 0.0;
        while age <= 120.0 {
            let score = scorer.score(&HealthProfile { age, ..baseline() }).score;
            assert!(
                score >= previous,
                "score decreased at age {age}: {previous} -> {score}"
            );
            previous = score;
            age += 0.5;
        }
    }

    #[test]
    fn test_glucose_monotonicity() {
        let scorer = RiskScorer::new();
        let mut previous = f64::NEG_INFINITY;
        let mut glucose = 50.0;
        while glucose <= 500.0 {
            let score = scorer
                .score(&HealthProfile {
                    avg_glucose_level: glucose,
                    ..baseline()
                })
                .score;
            assert!(score >= previous, "score decreased at glucose {glucose}");
            previous = score;
            glucose += 1.0;
        }
    }

    #[test]
    fn test_bmi_severity_monotonicity() {
        // Above the healthy band, increasing BMI never lowers the score.
        let scorer = RiskScorer::new();
        let mut previous = f64::NEG_INFINITY;
        let mut bmi = 25.0;
        while bmi <= 60.0 {
            let score = scorer.score(&HealthProfile { bmi, ..baseline() }).score;
            assert!(score >= previous, "score decreased at BMI {bmi}");
            previous = score;
            bmi += 0.25;
        }
    }

    #[test]
    fn test_tier_consistency() {
        let scorer = RiskScorer::new();
        let profiles = [
            baseline(),
            HealthProfile {
                age: 72.0,
                hypertension: true,
                heart_disease: true,
                avg_glucose_level: 165.0,
                bmi: 32.0,
                ..baseline()
            },
            HealthProfile {
                age: 85.0,
                gender: Gender::Male,
                hypertension: true,
                heart_disease: true,
                work_type: WorkType::SelfEmployed,
                residence_type: ResidenceType::Urban,
                avg_glucose_level: 280.0,
                bmi: 42.0,
                smoking_status: SmokingStatus::Smokes,
                ..baseline()
            },
        ];

        for profile in &profiles {
            let result = scorer.score(profile);
            assert_eq!(result.tier, RiskScorer::tier_for(result.score));
        }
    }

    #[test]
    fn test_tier_cutoff_boundaries() {
        // Scores exactly at a cutoff map to the lower tier.
        assert_eq!(RiskScorer::tier_for(0.15), RiskTier::VeryLow);
        assert_eq!(RiskScorer::tier_for(0.1501), RiskTier::Low);
        assert_eq!(RiskScorer::tier_for(0.30), RiskTier::Low);
        assert_eq!(RiskScorer::tier_for(0.50), RiskTier::Moderate);
        assert_eq!(RiskScorer::tier_for(0.70), RiskTier::High);
        assert_eq!(RiskScorer::tier_for(0.85), RiskTier::VeryHigh);
        assert_eq!(RiskScorer::tier_for(0.86), RiskTier::Critical);
        assert_eq!(RiskScorer::tier_for(0.0), RiskTier::VeryLow);
    }

    #[test]
    fn test_contributing_factors_are_nonzero_in_rule_order() {
        let scorer = RiskScorer::new();
        let profile = HealthProfile {
            age: 70.0,
            hypertension: true,
            avg_glucose_level: 160.0,
            smoking_status: SmokingStatus::Smokes,
            ..baseline()
        };

        let result = scorer.score(&profile);
        let names: Vec<&str> = result
            .contributing_factors
            .iter()
            .map(|f| f.factor.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["age", "hypertension", "avg_glucose_level", "smoking_status"]
        );
        assert!(result.contributing_factors.iter().all(|f| f.contribution > 0.0));
    }

    #[test]
    fn test_breakdown_covers_all_rules() {
        let scorer = RiskScorer::new();
        let breakdown = scorer.breakdown(&baseline());
        assert_eq!(breakdown.len(), 9);
        assert_eq!(breakdown[0].factor, "age");
        assert_eq!(breakdown[8].factor, "gender");

        let weight_sum: f64 = breakdown.iter().map(|f| f.weight).sum();
        assert!((weight_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_high_risk_scores_above_low_risk() {
        let scorer = RiskScorer::new();

        let low = HealthProfile {
            age: 30.0,
            hypertension: false,
            heart_disease: false,
            avg_glucose_level: 90.0,
            bmi: 22.0,
            smoking_status: SmokingStatus::NeverSmoked,
            ..baseline()
        };
        let high = HealthProfile {
            age: 70.0,
            hypertension: true,
            heart_disease: false,
            avg_glucose_level: 160.0,
            bmi: 32.0,
            smoking_status: SmokingStatus::Smokes,
            ..baseline()
        };

        assert!(scorer.score(&high).score > scorer.score(&low).score);
    }

    #[test]
    fn test_glucose_band_boundaries() {
        // Lower band edges are inclusive: exactly 100 is pre-diabetic,
        // exactly 126 is diabetic.
        assert_eq!(band_multiplier(GLUCOSE_BANDS, 99.9), 0.0);
        assert_eq!(band_multiplier(GLUCOSE_BANDS, 100.0), 0.3);
        assert_eq!(band_multiplier(GLUCOSE_BANDS, 126.0), 0.6);
        // The final edge saturates instead of falling out of the table.
        assert_eq!(band_multiplier(GLUCOSE_BANDS, 500.0), 1.0);
        assert_eq!(band_multiplier(AGE_BANDS, 120.0), 1.0);
    }

    #[test]
    fn test_band_edges_step_not_interpolate() {
        // Bands are steps: crossing the glucose-100 edge adds exactly the
        // pre-diabetic multiplier times the glucose weight, and values
        // inside a band all score the same.
        let scorer = RiskScorer::new();
        let at = |glucose: f64| {
            scorer
                .score(&HealthProfile {
                    avg_glucose_level: glucose,
                    ..baseline()
                })
                .score
        };

        let jump = at(100.0) - at(99.99);
        assert!((jump - 0.14 * 0.3).abs() < 1e-9);
        assert_eq!(at(100.0), at(125.99));
    }

    #[test]
    fn test_healthy_bmi_does_not_contribute() {
        let scorer = RiskScorer::new();
        let result = scorer.score(&HealthProfile {
            bmi: 24.0,
            ..baseline()
        });
        assert!(result.contributing_factors.iter().all(|f| f.factor != "bmi"));

        let underweight = scorer.score(&HealthProfile {
            bmi: 17.0,
            ..baseline()
        });
        assert!(underweight
            .contributing_factors
            .iter()
            .any(|f| f.factor == "bmi"));
    }
}
