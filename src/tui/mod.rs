//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Dashboard with system status
//! - Health profile entry
//! - Risk assessment results
//! - History browsing and analytics

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
