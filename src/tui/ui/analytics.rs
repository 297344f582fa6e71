//! Analytics view: aggregate statistics over stored assessments.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::RiskSummary;
use crate::domain::RiskTier;
use crate::tui::styles::MedicalTheme;

/// Analytics screen state.
#[derive(Default)]
pub struct AnalyticsState {
    pub summary: Option<RiskSummary>,
    pub error: Option<String>,
}

/// Render the analytics screen.
pub fn render_analytics(f: &mut Frame, area: Rect, state: &AnalyticsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_analytics_header(f, chunks[0]);
    render_analytics_content(f, chunks[1], state);
    render_analytics_footer(f, chunks[2]);
}

fn render_analytics_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Risk Analytics", MedicalTheme::title()),
        Span::styled(" │ Population Overview", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_analytics_content(f: &mut Frame, area: Rect, state: &AnalyticsState) {
    if let Some(err) = &state.error {
        render_analytics_error(f, area, err);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .margin(1)
        .split(area);

    render_statistics(f, chunks[0], state);
    render_tier_distribution(f, chunks[1], state);
}

fn render_analytics_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "! Cannot Load Statistics",
            MedicalTheme::danger(),
        )),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_statistics(f: &mut Frame, area: Rect, state: &AnalyticsState) {
    let block = Block::default()
        .title(Span::styled(
            " Aggregate Statistics ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    match &state.summary {
        Some(summary) if summary.total > 0 => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Total count
                    Constraint::Length(4), // Average score
                    Constraint::Length(4), // High-risk rate
                    Constraint::Min(0),    // Padding
                ])
                .margin(1)
                .split(inner);

            let count_text = Paragraph::new(Line::from(vec![
                Span::styled("Total Assessments: ", MedicalTheme::text_secondary()),
                Span::styled(summary.total.to_string(), MedicalTheme::text()),
            ]));
            f.render_widget(count_text, chunks[0]);

            let avg_gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(Span::styled(
                            " Average Risk Score ",
                            MedicalTheme::text_secondary(),
                        ))
                        .borders(Borders::ALL)
                        .border_style(MedicalTheme::border()),
                )
                .gauge_style(MedicalTheme::risk_gauge(summary.avg_score))
                .percent((summary.avg_score * 100.0).clamp(0.0, 100.0) as u16)
                .label(format!("{:.1}%", summary.avg_score * 100.0));
            f.render_widget(avg_gauge, chunks[1]);

            let high_gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(Span::styled(
                            " High-Risk Share (High or above) ",
                            MedicalTheme::text_secondary(),
                        ))
                        .borders(Borders::ALL)
                        .border_style(MedicalTheme::border()),
                )
                .gauge_style(MedicalTheme::risk_gauge(summary.high_rate))
                .percent((summary.high_rate * 100.0).clamp(0.0, 100.0) as u16)
                .label(format!("{:.1}%", summary.high_rate * 100.0));
            f.render_widget(high_gauge, chunks[2]);
        }
        _ => {
            let no_data = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No statistics available",
                    MedicalTheme::text_muted(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press [R] to refresh",
                    MedicalTheme::text_secondary(),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(no_data, inner);
        }
    }
}

fn render_tier_distribution(f: &mut Frame, area: Rect, state: &AnalyticsState) {
    let block = Block::default()
        .title(Span::styled(" Tier Distribution ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(summary) = &state.summary else {
        return;
    };
    if summary.total == 0 {
        return;
    }

    let mut lines = Vec::with_capacity(7);
    for tier in [
        RiskTier::VeryLow,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::VeryHigh,
        RiskTier::Critical,
    ] {
        let count = summary.count_for(tier);
        let share = count as f64 / summary.total as f64;
        let width = (share * 20.0).round() as usize;
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<10}", tier.to_string()),
                MedicalTheme::risk_tier(tier),
            ),
            Span::styled("█".repeat(width), MedicalTheme::risk_tier(tier)),
            Span::styled(
                format!(" {count} ({:.0}%)", share * 100.0),
                MedicalTheme::text_secondary(),
            ),
        ]));
    }

    let p = Paragraph::new(lines).block(Block::default());
    f.render_widget(p, inner);
}

fn render_analytics_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Refresh ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Back", MedicalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
