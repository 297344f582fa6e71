//! Health profile input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{
    Gender, HealthProfile, ResidenceType, SmokingStatus, WorkType, AGE_RANGE, BMI_RANGE,
    GLUCOSE_RANGE,
};
use crate::tui::styles::MedicalTheme;

/// How a field collects its value.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free-text numeric entry.
    Numeric { value: String, min: f64, max: f64 },
    /// Fixed option list cycled with the arrow keys.
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Numeric {
                value: String::new(),
                min,
                max,
            },
        }
    }

    fn choice(label: &'static str, hint: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Choice {
                options,
                selected: 0,
            },
        }
    }
}

const YES_NO: &[&str] = &["No", "Yes"];
const GENDERS: &[&str] = &["Female", "Male", "Other"];
const WORK_TYPES: &[&str] = &[
    "Private",
    "Self-employed",
    "Government job",
    "Never worked",
    "Children",
];
const RESIDENCES: &[&str] = &["Urban", "Rural"];
const SMOKING: &[&str] = &["Never smoked", "Formerly smoked", "Smokes", "Unknown"];

// Field positions, fixed by the Default impl below.
const F_AGE: usize = 0;
const F_GENDER: usize = 1;
const F_HYPERTENSION: usize = 2;
const F_HEART_DISEASE: usize = 3;
const F_EVER_MARRIED: usize = 4;
const F_WORK_TYPE: usize = 5;
const F_RESIDENCE: usize = 6;
const F_GLUCOSE: usize = 7;
const F_BMI: usize = 8;
const F_SMOKING: usize = 9;

/// Profile form state
pub struct ProfileFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for ProfileFormState {
    fn default() -> Self {
        let (age_lo, age_hi) = AGE_RANGE;
        let (glu_lo, glu_hi) = GLUCOSE_RANGE;
        let (bmi_lo, bmi_hi) = BMI_RANGE;

        Self {
            fields: vec![
                FormField::numeric("Age", "years (0-120)", age_lo, age_hi),
                FormField::choice("Gender", "←/→ to change", GENDERS),
                FormField::choice("Hypertension", "diagnosed", YES_NO),
                FormField::choice("Heart Disease", "diagnosed", YES_NO),
                FormField::choice("Ever Married", "", YES_NO),
                FormField::choice("Work Type", "←/→ to change", WORK_TYPES),
                FormField::choice("Residence", "←/→ to change", RESIDENCES),
                FormField::numeric("Avg Glucose", "mg/dL (50-500)", glu_lo, glu_hi),
                FormField::numeric("BMI", "kg/m² (10-60)", bmi_lo, bmi_hi),
                FormField::choice("Smoking Status", "←/→ to change", SMOKING),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl ProfileFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric fields only)
    pub fn input_char(&mut self, c: char) {
        if let FieldKind::Numeric { value, .. } = &mut self.fields[self.selected_field].kind {
            if c.is_ascii_digit() || c == '.' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character of a numeric field
    pub fn delete_char(&mut self) {
        if let FieldKind::Numeric { value, .. } = &mut self.fields[self.selected_field].kind {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        match &mut self.fields[self.selected_field].kind {
            FieldKind::Numeric { value, .. } => value.clear(),
            FieldKind::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Cycle the current choice field forward
    pub fn cycle_next(&mut self) {
        if let FieldKind::Choice { options, selected } = &mut self.fields[self.selected_field].kind
        {
            *selected = (*selected + 1) % options.len();
            self.error_message = None;
        }
    }

    /// Cycle the current choice field backward
    pub fn cycle_prev(&mut self) {
        if let FieldKind::Choice { options, selected } = &mut self.fields[self.selected_field].kind
        {
            *selected = if *selected == 0 {
                options.len() - 1
            } else {
                *selected - 1
            };
            self.error_message = None;
        }
    }

    /// Wipe all field buffers from memory and reset the form.
    ///
    /// Called after a submitted assessment so plaintext health data does not
    /// persist in the UI state.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.kind {
                FieldKind::Numeric { value, .. } => value.zeroize(),
                FieldKind::Choice { selected, .. } => *selected = 0,
            }
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    fn numeric_value(&self, index: usize) -> Result<f64, String> {
        let field = &self.fields[index];
        match &field.kind {
            FieldKind::Numeric { value, min, max } => {
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| format!("{}: Invalid number", field.label))?;
                if parsed < *min || parsed > *max {
                    return Err(format!(
                        "{}: Value must be between {} and {}",
                        field.label, min, max
                    ));
                }
                Ok(parsed)
            }
            FieldKind::Choice { .. } => Err(format!("{}: Expected a number", field.label)),
        }
    }

    fn choice_index(&self, index: usize) -> usize {
        match &self.fields[index].kind {
            FieldKind::Choice { selected, .. } => *selected,
            FieldKind::Numeric { .. } => 0,
        }
    }

    /// Validate and convert to a HealthProfile
    pub fn to_profile(&self) -> Result<HealthProfile, String> {
        let gender = match self.choice_index(F_GENDER) {
            0 => Gender::Female,
            1 => Gender::Male,
            _ => Gender::Other,
        };
        let work_type = match self.choice_index(F_WORK_TYPE) {
            0 => WorkType::Private,
            1 => WorkType::SelfEmployed,
            2 => WorkType::GovernmentJob,
            3 => WorkType::NeverWorked,
            _ => WorkType::Children,
        };
        let residence_type = match self.choice_index(F_RESIDENCE) {
            0 => ResidenceType::Urban,
            _ => ResidenceType::Rural,
        };
        let smoking_status = match self.choice_index(F_SMOKING) {
            0 => SmokingStatus::NeverSmoked,
            1 => SmokingStatus::FormerlySmoked,
            2 => SmokingStatus::Smokes,
            _ => SmokingStatus::Unknown,
        };

        Ok(HealthProfile {
            age: self.numeric_value(F_AGE)?,
            gender,
            hypertension: self.choice_index(F_HYPERTENSION) == 1,
            heart_disease: self.choice_index(F_HEART_DISEASE) == 1,
            ever_married: self.choice_index(F_EVER_MARRIED) == 1,
            work_type,
            residence_type,
            avg_glucose_level: self.numeric_value(F_GLUCOSE)?,
            bmi: self.numeric_value(F_BMI)?,
            smoking_status,
        })
    }

    /// Load sample data (elevated-risk profile for demonstration)
    pub fn load_sample_data(&mut self) {
        let numeric = [(F_AGE, "72"), (F_GLUCOSE, "168"), (F_BMI, "31.5")];
        for (i, val) in numeric {
            if let FieldKind::Numeric { value, .. } = &mut self.fields[i].kind {
                *value = val.to_string();
            }
        }

        let choices = [
            (F_GENDER, 1),        // Male
            (F_HYPERTENSION, 1),  // Yes
            (F_HEART_DISEASE, 1), // Yes
            (F_EVER_MARRIED, 1),  // Yes
            (F_WORK_TYPE, 1),     // Self-employed
            (F_RESIDENCE, 0),     // Urban
            (F_SMOKING, 1),       // Formerly smoked
        ];
        for (i, sel) in choices {
            if let FieldKind::Choice { selected, .. } = &mut self.fields[i].kind {
                *selected = sel;
            }
        }
    }
}

/// Render the health profile input form
pub fn render_profile_form(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Health Profile Entry", MedicalTheme::title()),
        Span::styled(" │ Stroke Risk Factors", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    // Create a two-column layout
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    // Left column
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);

    // Right column
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let content = match &field.kind {
            FieldKind::Numeric { value, .. } => {
                let value_display = if value.is_empty() {
                    Span::styled(field.hint, MedicalTheme::text_muted())
                } else {
                    Span::styled(value.as_str(), MedicalTheme::text())
                };
                Paragraph::new(Line::from(vec![
                    Span::raw(" "),
                    value_display,
                    if is_selected {
                        Span::styled("▌", MedicalTheme::primary_cursor())
                    } else {
                        Span::raw("")
                    },
                ]))
            }
            FieldKind::Choice { options, selected } => {
                let arrows_style = if is_selected {
                    MedicalTheme::key_hint()
                } else {
                    MedicalTheme::text_muted()
                };
                Paragraph::new(Line::from(vec![
                    Span::raw(" "),
                    Span::styled("◂ ", arrows_style),
                    Span::styled(options[*selected], MedicalTheme::text()),
                    Span::styled(" ▸", arrows_style),
                ]))
            }
        };

        f.render_widget(content.block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &ProfileFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Change ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Assess ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Cancel", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProfileFormState {
        let mut form = ProfileFormState::default();
        form.load_sample_data();
        form
    }

    #[test]
    fn sample_data_converts_to_profile() {
        let form = filled_form();
        let profile = form.to_profile().expect("sample data should convert");
        assert_eq!(profile.age, 72.0);
        assert_eq!(profile.gender, Gender::Male);
        assert!(profile.hypertension);
        assert!(profile.heart_disease);
        assert_eq!(profile.work_type, WorkType::SelfEmployed);
        assert_eq!(profile.smoking_status, SmokingStatus::FormerlySmoked);
    }

    #[test]
    fn empty_numeric_field_rejected() {
        let form = ProfileFormState::default();
        let err = form.to_profile().unwrap_err();
        assert!(err.contains("Age"));
    }

    #[test]
    fn out_of_range_value_rejected() {
        let mut form = filled_form();
        if let FieldKind::Numeric { value, .. } = &mut form.fields[F_GLUCOSE].kind {
            *value = "900".to_string();
        }
        let err = form.to_profile().unwrap_err();
        assert!(err.contains("Avg Glucose"));
    }

    #[test]
    fn choice_cycling_wraps() {
        let mut form = ProfileFormState::default();
        form.selected_field = F_RESIDENCE;
        form.cycle_prev();
        assert_eq!(form.choice_index(F_RESIDENCE), RESIDENCES.len() - 1);
        form.cycle_next();
        assert_eq!(form.choice_index(F_RESIDENCE), 0);
    }

    #[test]
    fn clear_sensitive_wipes_buffers() {
        let mut form = filled_form();
        form.clear_sensitive();
        for field in &form.fields {
            match &field.kind {
                FieldKind::Numeric { value, .. } => assert!(value.is_empty()),
                FieldKind::Choice { selected, .. } => assert_eq!(*selected, 0),
            }
        }
    }
}
