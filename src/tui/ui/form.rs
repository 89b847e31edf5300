//! Patient data input form.

use std::str::FromStr;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    ChestPainType, PatientInput, RestingEcg, Sex, StSlope, Thalassemia, MAJOR_VESSELS_MAX,
};
use crate::tui::styles::MedicalTheme;

const MAX_NUMERIC_LEN: usize = 6;

/// Form field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Age,
    Sex,
    RestingBp,
    Cholesterol,
    FastingBloodSugar,
    ChestPain,
    MaxHeartRate,
    ExerciseAngina,
    RestingEcg,
    StDepression,
    StSlope,
    MajorVessels,
    Thalassemia,
}

/// Editable content of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text, parsed on submit
    Numeric(String),
    /// Index into a fixed option list
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub section: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub value: FieldValue,
}

impl FormField {
    fn numeric(
        id: FieldId,
        section: &'static str,
        label: &'static str,
        hint: &'static str,
        value: String,
    ) -> Self {
        Self {
            id,
            section,
            label,
            hint,
            value: FieldValue::Numeric(value),
        }
    }

    fn choice(
        id: FieldId,
        section: &'static str,
        label: &'static str,
        options: Vec<&'static str>,
        selected: usize,
    ) -> Self {
        Self {
            id,
            section,
            label,
            hint: "",
            value: FieldValue::Choice { options, selected },
        }
    }

    /// Text shown inside the field box.
    #[must_use]
    pub fn display(&self) -> &str {
        match &self.value {
            FieldValue::Numeric(text) => text.as_str(),
            FieldValue::Choice { options, selected } => {
                options.get(*selected).copied().unwrap_or_default()
            }
        }
    }
}

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self::from_input(&PatientInput::default())
    }
}

impl PatientFormState {
    /// Build the form prefilled with `input`.
    #[must_use]
    pub fn from_input(input: &PatientInput) -> Self {
        const DEMOGRAPHICS: &str = "Demographics";
        const VITALS: &str = "Vitals";
        const CLINICAL: &str = "Clinical Data";
        const ADVANCED: &str = "Advanced Clinical Metrics";

        let fields = vec![
            FormField::numeric(
                FieldId::Age,
                DEMOGRAPHICS,
                "Age",
                "years (1-120)",
                input.age.to_string(),
            ),
            FormField::choice(
                FieldId::Sex,
                DEMOGRAPHICS,
                "Sex",
                Sex::ALL.iter().map(|s| s.label()).collect(),
                position(&Sex::ALL, input.sex),
            ),
            FormField::numeric(
                FieldId::RestingBp,
                VITALS,
                "Resting Blood Pressure",
                "mm Hg (50-250)",
                input.resting_bp.to_string(),
            ),
            FormField::numeric(
                FieldId::Cholesterol,
                VITALS,
                "Serum Cholesterol",
                "mg/dl (100-600)",
                input.cholesterol.to_string(),
            ),
            FormField::choice(
                FieldId::FastingBloodSugar,
                VITALS,
                "Fasting Blood Sugar > 120 mg/dl",
                vec!["False", "True"],
                usize::from(input.fasting_blood_sugar),
            ),
            FormField::choice(
                FieldId::ChestPain,
                CLINICAL,
                "Chest Pain Type",
                ChestPainType::ALL.iter().map(|c| c.label()).collect(),
                position(&ChestPainType::ALL, input.chest_pain_type),
            ),
            FormField::numeric(
                FieldId::MaxHeartRate,
                CLINICAL,
                "Max Heart Rate Achieved",
                "bpm (60-220)",
                input.max_heart_rate.to_string(),
            ),
            FormField::choice(
                FieldId::ExerciseAngina,
                CLINICAL,
                "Exercise Induced Angina",
                vec!["No", "Yes"],
                usize::from(input.exercise_induced_angina),
            ),
            FormField::choice(
                FieldId::RestingEcg,
                CLINICAL,
                "Resting ECG",
                RestingEcg::ALL.iter().map(|e| e.label()).collect(),
                position(&RestingEcg::ALL, input.resting_ecg),
            ),
            FormField::numeric(
                FieldId::StDepression,
                ADVANCED,
                "ST Depression (Oldpeak)",
                "mm (0-10)",
                input.st_depression.to_string(),
            ),
            FormField::choice(
                FieldId::StSlope,
                ADVANCED,
                "Slope of Peak Exercise ST",
                StSlope::ALL.iter().map(|s| s.label()).collect(),
                position(&StSlope::ALL, input.st_slope),
            ),
            FormField::choice(
                FieldId::MajorVessels,
                ADVANCED,
                "Major Vessels (0-3)",
                vec!["0", "1", "2", "3"],
                usize::from(input.major_vessels.min(MAJOR_VESSELS_MAX)),
            ),
            FormField::choice(
                FieldId::Thalassemia,
                ADVANCED,
                "Thalassemia",
                Thalassemia::ALL.iter().map(|t| t.label()).collect(),
                position(&Thalassemia::ALL, input.thalassemia),
            ),
        ];

        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }

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

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        if let FieldValue::Numeric(text) = &mut self.fields[self.selected_field].value {
            if (c.is_ascii_digit() || c == '.') && text.len() < MAX_NUMERIC_LEN {
                text.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldValue::Numeric(text) = &mut self.fields[self.selected_field].value {
            text.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        if let FieldValue::Numeric(text) = &mut self.fields[self.selected_field].value {
            text.clear();
        }
    }

    /// Step the current choice field forward or backward, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        if let FieldValue::Choice { options, selected } =
            &mut self.fields[self.selected_field].value
        {
            let len = options.len();
            *selected = if forward {
                (*selected + 1) % len
            } else {
                (*selected + len - 1) % len
            };
            self.error_message = None;
        }
    }

    /// Parse every field into a `PatientInput`.
    ///
    /// Only checks that numbers parse; range checks belong to the domain.
    ///
    /// # Errors
    /// Returns a message naming the first field that does not parse.
    pub fn to_patient_input(&self) -> Result<PatientInput, String> {
        Ok(PatientInput {
            age: self.parse(FieldId::Age)?,
            sex: pick(&Sex::ALL, self.selected(FieldId::Sex))?,
            resting_bp: self.parse(FieldId::RestingBp)?,
            cholesterol: self.parse(FieldId::Cholesterol)?,
            fasting_blood_sugar: self.selected(FieldId::FastingBloodSugar) == 1,
            chest_pain_type: pick(&ChestPainType::ALL, self.selected(FieldId::ChestPain))?,
            max_heart_rate: self.parse(FieldId::MaxHeartRate)?,
            exercise_induced_angina: self.selected(FieldId::ExerciseAngina) == 1,
            resting_ecg: pick(&RestingEcg::ALL, self.selected(FieldId::RestingEcg))?,
            st_depression: self.parse(FieldId::StDepression)?,
            st_slope: pick(&StSlope::ALL, self.selected(FieldId::StSlope))?,
            major_vessels: u8::try_from(self.selected(FieldId::MajorVessels))
                .map_err(|_| "Major Vessels: Invalid selection".to_string())?,
            thalassemia: pick(&Thalassemia::ALL, self.selected(FieldId::Thalassemia))?,
        })
    }

    fn field(&self, id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn parse<T: FromStr>(&self, id: FieldId) -> Result<T, String> {
        let field = self
            .field(id)
            .ok_or_else(|| format!("{id:?}: missing field"))?;
        field
            .display()
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", field.label))
    }

    fn selected(&self, id: FieldId) -> usize {
        match self.field(id).map(|f| &f.value) {
            Some(FieldValue::Choice { selected, .. }) => *selected,
            _ => 0,
        }
    }
}

fn position<T: PartialEq + Copy>(all: &[T], value: T) -> usize {
    all.iter().position(|v| *v == value).unwrap_or(0)
}

fn pick<T: Copy>(all: &[T], index: usize) -> Result<T, String> {
    all.get(index)
        .copied()
        .ok_or_else(|| format!("Invalid selection {index}"))
}

/// Render the patient data input form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
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
        Span::styled("Heart Risk Predictor", MedicalTheme::title()),
        Span::styled(
            " │ Enter patient clinical data to assess heart disease risk",
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    // Demographics + Vitals on the left, the clinical groups on the right
    let mid = state
        .fields
        .iter()
        .position(|field| field.id == FieldId::ChestPain)
        .unwrap_or(state.fields.len() / 2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
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
    // (section heading, field index) rows in display order
    let mut rows: Vec<(Option<&'static str>, Option<usize>)> = Vec::new();
    let mut current_section = "";
    for (i, field) in fields.iter().enumerate() {
        if field.section != current_section {
            current_section = field.section;
            rows.push((Some(field.section), None));
        }
        rows.push((None, Some(i)));
    }

    let constraints: Vec<Constraint> = rows
        .iter()
        .map(|(heading, _)| {
            if heading.is_some() {
                Constraint::Length(1)
            } else {
                Constraint::Length(3)
            }
        })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (row, (heading, index)) in rows.iter().enumerate() {
        if let Some(title) = heading {
            let p = Paragraph::new(Span::styled(*title, MedicalTheme::subtitle()));
            f.render_widget(p, chunks[row]);
            continue;
        }
        let Some(i) = index else { continue };
        let field = &fields[*i];
        let is_selected = offset + i == selected;
        render_field(f, chunks[row], field, is_selected);
    }
}

fn render_field(f: &mut Frame, area: Rect, field: &FormField, is_selected: bool) {
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

    let mut spans = vec![Span::raw(" ")];
    match &field.value {
        FieldValue::Numeric(text) => {
            if text.is_empty() {
                spans.push(Span::styled(field.hint, MedicalTheme::text_muted()));
            } else {
                spans.push(Span::styled(text.as_str(), MedicalTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled("▌", MedicalTheme::cursor()));
            }
        }
        FieldValue::Choice { .. } => {
            if is_selected {
                spans.push(Span::styled("◀ ", MedicalTheme::cursor()));
                spans.push(Span::styled(field.display(), MedicalTheme::text()));
                spans.push(Span::styled(" ▶", MedicalTheme::cursor()));
            } else {
                spans.push(Span::styled(field.display(), MedicalTheme::text()));
            }
        }
    }

    let content = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
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
            Span::styled("PREDICT RISK ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
