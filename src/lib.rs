//! # StrokeGuard
//!
//! Local stroke-risk assessment application.
//!
//! This crate provides:
//! - A deterministic weighted-rule scoring engine over a health questionnaire
//! - Narrative risk factors and recommendations per assessment
//! - SQLite-backed assessment history and aggregate analytics
//! - A terminal UI for local-only deployment
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (HealthProfile, RiskResult, the scorer)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, HealthProfile, RiskResult, RiskScorer, RiskTier};

/// Result type for StrokeGuard operations
pub type Result<T> = std::result::Result<T, StrokeguardError>;

/// Main error type for StrokeGuard
#[derive(Debug, thiserror::Error)]
pub enum StrokeguardError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Invalid health profile: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
