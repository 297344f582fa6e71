//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::RiskTier;
use crate::tui::styles::MedicalTheme;

/// Tier counts over the most recent assessments, fetched at render time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentSummary {
    pub total: usize,
    pub tier_counts: [u32; 6],
}

impl RecentSummary {
    /// Record one assessment at the given tier.
    pub fn record(&mut self, tier: RiskTier) {
        self.total += 1;
        self.tier_counts[tier as usize] += 1;
    }

    fn count(&self, tier: RiskTier) -> u32 {
        self.tier_counts[tier as usize]
    }
}

/// Dashboard state for rendering.
///
/// `recent` is refreshed when the dashboard is (re)entered, not per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardState {
    pub storage_ok: bool,
    pub assessment_count: usize,
    pub recent: RecentSummary,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_main_content(f, chunks[1], state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("StrokeGuard", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Stroke Risk Assessment", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Split into left (status and actions) and right (recent assessments)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_status_panels(f, chunks[0], state);
    render_recent_summary(f, chunks[1], state.recent);
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // System status
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    // System Status
    let status_items = vec![
        format_status_item("Storage", state.storage_ok),
        Line::from(vec![
            Span::styled("  Assessments: ", MedicalTheme::text_secondary()),
            Span::styled(state.assessment_count.to_string(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Engine: ", MedicalTheme::text_secondary()),
            Span::styled("deterministic weighted rules", MedicalTheme::text_muted()),
        ]),
    ];

    let status_block = Block::default()
        .title(Span::styled(" System Status ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let status_list = Paragraph::new(status_items).block(status_block);
    f.render_widget(status_list, chunks[0]);

    // Quick Actions
    let actions = vec![
        Line::from(vec![
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[H] ", MedicalTheme::key_hint()),
            Span::styled("History", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[A] ", MedicalTheme::key_hint()),
            Span::styled("Analytics", MedicalTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let actions_list = Paragraph::new(actions).block(actions_block);
    f.render_widget(actions_list, chunks[1]);
}

fn format_status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK", MedicalTheme::success())
    } else {
        ("FAIL", MedicalTheme::danger())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), MedicalTheme::text()),
    ])
}

fn render_recent_summary(f: &mut Frame, area: Rect, recent: RecentSummary) {
    let block = Block::default()
        .title(Span::styled(" Recent Activity ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if recent.total == 0 {
        let empty_msg = Paragraph::new(Line::from(vec![Span::styled(
            "No assessments yet. Press [N] to start.",
            MedicalTheme::text_muted(),
        )]))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Last ", MedicalTheme::text_secondary()),
            Span::styled(recent.total.to_string(), MedicalTheme::text()),
            Span::styled(" assessments by tier", MedicalTheme::text_muted()),
        ]),
        Line::from(""),
    ];

    for tier in [
        RiskTier::VeryLow,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::VeryHigh,
        RiskTier::Critical,
    ] {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", tier.to_string()),
                MedicalTheme::risk_tier(tier),
            ),
            Span::styled(
                recent.count(tier).to_string(),
                MedicalTheme::text(),
            ),
        ]));
    }

    let p = Paragraph::new(lines).block(Block::default());
    f.render_widget(p, inner);
}
