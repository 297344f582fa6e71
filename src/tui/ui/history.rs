//! Assessment history view with paginated navigation.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::Assessment;
use crate::ports::AssessmentPage;
use crate::tui::styles::MedicalTheme;

/// Rows shown per history page.
pub const PAGE_SIZE: usize = 10;

/// History screen state.
#[derive(Default)]
pub struct HistoryState {
    pub page: Option<AssessmentPage>,
    pub offset: usize,
    pub selected: usize,
    pub error: Option<String>,
    /// A delete is pending; the next key confirms or cancels it.
    pub confirm_delete: bool,
}

impl HistoryState {
    /// Clamp the selection to the rows actually on this page.
    pub fn clamp_selection(&mut self) {
        let len = self.page.as_ref().map_or(0, |p| p.items.len());
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Move the selection down one row.
    pub fn select_next(&mut self) {
        let len = self.page.as_ref().map_or(0, |p| p.items.len());
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Move the selection up one row.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Currently selected assessment, if any.
    pub fn selected_assessment(&self) -> Option<&Assessment> {
        self.page.as_ref()?.items.get(self.selected)
    }

    /// Offset of the next page, if one exists.
    pub fn next_offset(&self) -> Option<usize> {
        self.page.as_ref()?.next_offset()
    }

    /// Offset of the previous page, if one exists.
    pub fn prev_offset(&self) -> Option<usize> {
        self.page.as_ref()?.prev_offset()
    }
}

/// Render the history screen.
pub fn render_history(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_history_header(f, chunks[0], state);
    render_history_table(f, chunks[1], state);
    render_history_footer(f, chunks[2], state);
}

fn render_history_header(f: &mut Frame, area: Rect, state: &HistoryState) {
    let position = match &state.page {
        Some(page) if page.total_count > 0 => {
            let first = page.offset + 1;
            let last = (page.offset + page.items.len()).min(page.total_count);
            format!(" │ {first}-{last} of {}", page.total_count)
        }
        _ => String::new(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment History", MedicalTheme::title()),
        Span::styled(position, MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_history_table(f: &mut Frame, area: Rect, state: &HistoryState) {
    if let Some(err) = &state.error {
        let content = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("! Cannot Load History", MedicalTheme::danger())),
            Line::from(""),
            Line::from(Span::styled(err.as_str(), MedicalTheme::text())),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::danger()),
        );
        f.render_widget(content, area);
        return;
    }

    let items = state.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[]);

    if items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No assessments recorded",
                MedicalTheme::text_muted(),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Subject"),
        Cell::from("Age"),
        Cell::from("Gender"),
        Cell::from("Tier"),
        Cell::from("Score"),
    ])
    .style(MedicalTheme::subtitle())
    .height(1);

    let rows: Vec<Row> = items
        .iter()
        .map(|a| {
            let tier = a.result.tier;
            Row::new(vec![
                Cell::from(a.created_at.format("%Y-%m-%d %H:%M").to_string())
                    .style(MedicalTheme::text_secondary()),
                Cell::from(a.subject_id.clone().unwrap_or_else(|| "-".to_string()))
                    .style(MedicalTheme::text_muted()),
                Cell::from(format!("{:.0}", a.profile.age)).style(MedicalTheme::text()),
                Cell::from(a.profile.gender.as_str()).style(MedicalTheme::text()),
                Cell::from(tier.as_str()).style(MedicalTheme::risk_tier(tier)),
                Cell::from(format!("{:.1}%", a.result.score * 100.0)).style(MedicalTheme::text()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(17),
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .highlight_style(MedicalTheme::selected())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_history_footer(f: &mut Frame, area: Rect, state: &HistoryState) {
    let content = if state.confirm_delete {
        Line::from(vec![
            Span::styled("Delete selected assessment? ", MedicalTheme::warning()),
            Span::styled("[Y] ", MedicalTheme::key_hint()),
            Span::styled("Confirm ", MedicalTheme::key_desc()),
            Span::styled("[N/Esc] ", MedicalTheme::key_hint()),
            Span::styled("Cancel", MedicalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Select ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Page ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("View ", MedicalTheme::key_desc()),
            Span::styled("[D] ", MedicalTheme::key_hint()),
            Span::styled("Delete ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
