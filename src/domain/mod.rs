//! Domain layer: Core business types and the scoring engine.
//!
//! This module contains pure Rust types with no external collaborators.
//! Scoring is deterministic and side-effect free.

pub mod advice;
mod assessment;
pub(crate) mod profile;
mod scoring;

pub use assessment::{Assessment, FactorContribution, RiskResult, RiskTier};
pub use profile::{
    Gender, HealthProfile, ResidenceType, SmokingStatus, WorkType, AGE_RANGE, BMI_RANGE,
    GLUCOSE_RANGE,
};
pub use scoring::RiskScorer;
