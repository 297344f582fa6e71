//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::sqlite::SqliteStorage;
use crate::application::{AnalyticsService, AssessmentService};

use super::ui::{
    analytics::{render_analytics, AnalyticsState},
    dashboard::{render_dashboard, DashboardState, RecentSummary},
    form::{render_profile_form, ProfileFormState},
    history::{render_history, HistoryState, PAGE_SIZE},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    ProfileForm,
    Result,
    History,
    Analytics,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Assessment service (scoring and persistence)
    assessment_service: AssessmentService<SqliteStorage>,

    /// Analytics service
    analytics_service: AnalyticsService<SqliteStorage>,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Profile form state
    form_state: ProfileFormState,

    /// Result state
    result_state: ResultState,

    /// History state
    history_state: HistoryState,

    /// Analytics state
    analytics_state: AnalyticsState,
}

impl App {
    /// Create a new application instance using the default storage adapter.
    ///
    /// # Errors
    /// Returns error if storage cannot be initialized.
    pub fn new() -> Result<Self> {
        let db_path = std::env::var("STROKEGUARD_DB_PATH")
            .unwrap_or_else(|_| "strokeguard.db".to_string());
        let storage = Arc::new(SqliteStorage::new(&db_path)?);

        let assessment_service = AssessmentService::new(storage.clone());
        let analytics_service = AnalyticsService::new(storage);

        Ok(Self::with_dependencies(assessment_service, analytics_service))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    ///
    /// Allows `main.rs` or tests to construct the storage adapter externally.
    pub fn with_dependencies(
        assessment_service: AssessmentService<SqliteStorage>,
        analytics_service: AnalyticsService<SqliteStorage>,
    ) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            assessment_service,
            analytics_service,
            dashboard_state: DashboardState::default(),
            form_state: ProfileFormState::default(),
            result_state: ResultState::default(),
            history_state: HistoryState::default(),
            analytics_state: AnalyticsState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Initial state update
        self.update_dashboard_state();

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => {
                        render_dashboard(f, content_area, &self.dashboard_state)
                    }
                    Screen::ProfileForm => render_profile_form(f, content_area, &self.form_state),
                    Screen::Result => render_result(f, content_area, &self.result_state),
                    Screen::History => render_history(f, content_area, &self.history_state),
                    Screen::Analytics => render_analytics(f, content_area, &self.analytics_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::ProfileForm => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::History => self.handle_history_key(key),
            Screen::Analytics => self.handle_analytics_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = ProfileFormState::default();
                self.screen = Screen::ProfileForm;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.load_history(0);
                self.screen = Screen::History;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.load_analytics();
                self.screen = Screen::Analytics;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            ResultState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.update_dashboard_state();
                    self.screen = Screen::Dashboard;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = ProfileFormState::default();
                    self.screen = Screen::ProfileForm;
                }
                _ => {}
            },
            ResultState::Error { .. } => match key {
                KeyCode::Enter => {
                    self.screen = Screen::ProfileForm;
                }
                KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            },
            ResultState::Idle => {
                if key == KeyCode::Esc {
                    self.screen = Screen::Dashboard;
                }
            }
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        if self.history_state.confirm_delete {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.history_state.confirm_delete = false;
                    self.delete_selected();
                }
                _ => {
                    self.history_state.confirm_delete = false;
                }
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                self.update_dashboard_state();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.history_state.select_prev();
            }
            KeyCode::Down => {
                self.history_state.select_next();
            }
            KeyCode::Left | KeyCode::PageUp => {
                if let Some(offset) = self.history_state.prev_offset() {
                    self.load_history(offset);
                }
            }
            KeyCode::Right | KeyCode::PageDown => {
                if let Some(offset) = self.history_state.next_offset() {
                    self.load_history(offset);
                }
            }
            KeyCode::Enter => {
                if let Some(assessment) = self.history_state.selected_assessment() {
                    self.result_state = ResultState::Complete {
                        assessment: assessment.clone(),
                    };
                    self.screen = Screen::Result;
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.history_state.selected_assessment().is_some() {
                    self.history_state.confirm_delete = true;
                }
            }
            _ => {}
        }
    }

    fn handle_analytics_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.load_analytics();
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let profile = match self.form_state.to_profile() {
            Ok(profile) => profile,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        // Scoring is synchronous and instant; no background work needed.
        match self.assessment_service.run_assessment(profile, None) {
            Ok(assessment) => {
                self.result_state = ResultState::Complete { assessment };
                self.screen = Screen::Result;
                // Clear plaintext buffers from the UI immediately.
                self.form_state.clear_sensitive();
            }
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self
            .history_state
            .selected_assessment()
            .map(|a| a.id.clone())
        else {
            return;
        };

        if let Err(e) = self.assessment_service.delete(&id) {
            tracing::error!("Failed to delete assessment: {}", e);
            self.history_state.error = Some(e.to_string());
            return;
        }

        // Reload the page that now covers the deleted row's position.
        let offset = self.history_state.offset;
        self.load_history(offset);

        // Step back a page when the last row of the final page was removed.
        if self
            .history_state
            .page
            .as_ref()
            .is_some_and(|p| p.items.is_empty() && p.offset > 0)
        {
            let prev = offset.saturating_sub(PAGE_SIZE);
            self.load_history(prev);
        }
    }

    fn load_history(&mut self, offset: usize) {
        match self.assessment_service.history_page(offset, PAGE_SIZE) {
            Ok(page) => {
                self.history_state.offset = page.offset;
                self.history_state.page = Some(page);
                self.history_state.error = None;
                self.history_state.clamp_selection();
            }
            Err(e) => {
                tracing::error!("Failed to load history page: {}", e);
                self.history_state.page = None;
                self.history_state.error = Some(e.to_string());
            }
        }
    }

    fn load_analytics(&mut self) {
        match self.analytics_service.summary() {
            Ok(summary) => {
                self.analytics_state.summary = Some(summary);
                self.analytics_state.error = None;
            }
            Err(e) => {
                self.analytics_state.error = Some(e.to_string());
            }
        }
    }

    /// Refresh the cached dashboard data. Called on entry to the dashboard,
    /// not per frame, so the render loop issues no queries.
    fn update_dashboard_state(&mut self) {
        match self.assessment_service.count() {
            Ok(count) => {
                self.dashboard_state.storage_ok = true;
                self.dashboard_state.assessment_count = count;
            }
            Err(e) => {
                tracing::error!("Storage check failed: {}", e);
                self.dashboard_state.storage_ok = false;
            }
        }

        let mut recent = RecentSummary::default();
        match self.assessment_service.recent(10) {
            Ok(assessments) => {
                for a in &assessments {
                    recent.record(a.result.tier);
                }
            }
            Err(e) => {
                tracing::error!("Failed to load recent assessments: {}", e);
            }
        }
        self.dashboard_state.recent = recent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Gender, HealthProfile, ResidenceType, RiskTier, SmokingStatus, WorkType,
    };

    fn test_app() -> (App, AssessmentService<SqliteStorage>) {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        let app = App::with_dependencies(
            AssessmentService::new(storage.clone()),
            AnalyticsService::new(storage.clone()),
        );
        (app, AssessmentService::new(storage))
    }

    fn healthy_profile() -> HealthProfile {
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

    #[test]
    fn test_dashboard_refresh_caches_counts_and_recent() {
        let (mut app, service) = test_app();

        app.update_dashboard_state();
        assert!(app.dashboard_state.storage_ok);
        assert_eq!(app.dashboard_state.assessment_count, 0);
        assert_eq!(app.dashboard_state.recent.total, 0);

        service
            .run_assessment(healthy_profile(), None)
            .expect("Should assess");

        // Render state is stale until the dashboard is re-entered.
        assert_eq!(app.dashboard_state.assessment_count, 0);

        app.update_dashboard_state();
        assert_eq!(app.dashboard_state.assessment_count, 1);
        assert_eq!(app.dashboard_state.recent.total, 1);
        assert_eq!(
            app.dashboard_state.recent.tier_counts[RiskTier::VeryLow as usize],
            1
        );
    }
}
