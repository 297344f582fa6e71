//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Assessment, RiskTier};
use crate::tui::styles::MedicalTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing to show yet
    #[default]
    Idle,
    /// Completed assessment
    Complete { assessment: Assessment },
    /// Error occurred
    Error { message: String },
}

/// Render the assessment result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Complete { assessment } => render_assessment(f, chunks[1], assessment),
        ResultState::Error { message } => render_error(f, chunks[1], message),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Risk Assessment", MedicalTheme::title()),
        Span::styled(" │ Weighted Factor Analysis", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No assessment yet",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter a health profile to begin",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Assessment Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tier banner
            Constraint::Length(3), // Score gauge
            Constraint::Min(0),    // Factors and recommendations
        ])
        .margin(1)
        .split(inner);

    let tier = assessment.result.tier;
    let tier_style = MedicalTheme::risk_tier(tier);

    let tier_icon = match tier {
        RiskTier::VeryLow | RiskTier::Low => "OK",
        RiskTier::Moderate => "!",
        _ => "!!",
    };

    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {} Risk", tier_icon, tier),
            tier_style.add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            tier.description(),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(banner, chunks[0]);

    let score_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(tier_style)
        .percent((assessment.result.score * 100.0).clamp(0.0, 100.0) as u16)
        .label(format!("{:.1}%", assessment.result.score * 100.0));
    f.render_widget(score_gauge, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_factors(f, columns[0], assessment);
    render_recommendations(f, columns[1], assessment);
}

fn render_factors(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(
            " Contributing Factors ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let mut lines: Vec<Line> = assessment
        .result
        .contributing_factors
        .iter()
        .map(|factor| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<20}", factor_label(&factor.factor)),
                    MedicalTheme::text(),
                ),
                Span::styled(
                    format!("+{:.3}", factor.contribution),
                    MedicalTheme::warning(),
                ),
                Span::styled(
                    format!("  (weight {:.2})", factor.weight),
                    MedicalTheme::text_muted(),
                ),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No elevated factors",
            MedicalTheme::success(),
        )));
    }

    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}

fn render_recommendations(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Recommendations ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let lines: Vec<Line> = assessment
        .recommendations
        .iter()
        .map(|rec| {
            Line::from(vec![
                Span::styled(" • ", MedicalTheme::info()),
                Span::styled(rec.clone(), MedicalTheme::text()),
            ])
        })
        .collect();

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", MedicalTheme::danger())),
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

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Return ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment", MedicalTheme::key_desc()),
        ]),
        ResultState::Error { .. } => Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Back to Form ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Cancel", MedicalTheme::key_desc()),
        ]),
        ResultState::Idle => Line::from(vec![Span::styled(
            "Waiting for input...",
            MedicalTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

/// Human-readable label for a scoring rule name.
fn factor_label(rule: &str) -> &str {
    match rule {
        "age" => "Age",
        "hypertension" => "Hypertension",
        "heart_disease" => "Heart Disease",
        "avg_glucose_level" => "Avg Glucose",
        "bmi" => "BMI",
        "smoking_status" => "Smoking Status",
        "work_type" => "Work Type",
        "residence_type" => "Residence",
        "gender" => "Gender",
        other => other,
    }
}
