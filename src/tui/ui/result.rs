//! Risk assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Assessment, RiskLevel};
use crate::tui::styles::MedicalTheme;

const NO_FACTORS_MESSAGE: &str =
    "No specific critical risk factors identified based on standard thresholds.";

/// Render the result page for the last assessment
pub fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    render_result_content(f, chunks[1], assessment);
    render_result_footer(f, chunks[2]);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Assessment Result", MedicalTheme::title()),
        Span::styled(" │ Heart Risk Predictor", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_result_content(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let factor_rows = assessment.risk_factors.len().max(1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),               // Risk summary
            Constraint::Length(factor_rows + 2), // Key risk factors
            Constraint::Min(4),                  // Explanation
        ])
        .margin(1)
        .split(area);

    render_summary(f, chunks[0], assessment);
    render_factors(f, chunks[1], assessment);
    render_explanation(f, chunks[2]);
}

fn render_summary(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let level = assessment.risk_level();
    let risk_style = MedicalTheme::risk_level(level);
    let probability = assessment.scoring.probability_of_disease();

    let block = Block::default()
        .title(Span::styled(" Risk Summary ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(risk_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Level
            Constraint::Length(3), // Gauge
        ])
        .split(inner);

    let icon = match level {
        RiskLevel::Low => "OK",
        RiskLevel::High => "!",
    };

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Heart Disease Risk: ", MedicalTheme::text_secondary()),
            Span::styled(
                format!("{} {}", icon, assessment.scoring.summary()),
                risk_style,
            ),
        ]),
        Line::from(Span::styled(level.description(), MedicalTheme::text_muted())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(summary, rows[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Probability of Heart Disease ",
                    MedicalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(risk_style)
        .ratio(probability.clamp(0.0, 1.0))
        .label(format!("{:.1}%", probability * 100.0));
    f.render_widget(gauge, rows[1]);
}

fn render_factors(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let lines: Vec<Line> = if assessment.risk_factors.is_empty() {
        vec![Line::from(Span::styled(
            NO_FACTORS_MESSAGE,
            MedicalTheme::success(),
        ))]
    } else {
        assessment
            .risk_factors
            .iter()
            .map(|factor| {
                let mut spans = vec![
                    Span::styled("▎ ", MedicalTheme::factor_marker()),
                    Span::styled(factor.to_string(), MedicalTheme::text()),
                ];
                if let Some(note) = factor.threshold_note() {
                    spans.push(Span::styled(
                        format!(" ({note})"),
                        MedicalTheme::text_muted(),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    };

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Key Risk Factors ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(list, area);
}

fn render_explanation(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(Span::styled(
        "These factors are strongly associated with increased cardiovascular risk. \
         The model analyzes the complex interaction between your vitals and clinical \
         history to generate this assessment.",
        MedicalTheme::text(),
    ))];

    let p = Paragraph::new(text)
        .block(
            Block::default()
                .title(Span::styled(" Explanation ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

fn render_result_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[Backspace/Esc/B] ", MedicalTheme::key_hint()),
        Span::styled("Back to Predictor ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

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
    use crate::domain::{risk_factors, PatientInput, ScoringResult};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(assessment: &Assessment) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).expect("terminal");
        terminal
            .draw(|f| render_result(f, f.area(), assessment))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_high_risk_with_factors() {
        let input = PatientInput::default();
        let factors = risk_factors::evaluate(&input);
        let assessment = Assessment::new(input, ScoringResult::new(0, [0.688, 0.312]), factors);

        let text = rendered(&assessment);
        assert!(text.contains("Risk Summary"));
        assert!(text.contains("HIGH (68.8%)"));
        assert!(text.contains("High Cholesterol"));
        assert!(text.contains("(> 200 mg/dl)"));
        assert!(text.contains("Age above 55"));
        assert!(!text.contains(NO_FACTORS_MESSAGE));
        assert!(text.contains("Back to Predictor"));
    }

    #[test]
    fn test_low_risk_without_factors() {
        let input = PatientInput {
            age: 41,
            resting_bp: 118,
            cholesterol: 190,
            max_heart_rate: 150,
            chest_pain_type: crate::domain::ChestPainType::TypicalAngina,
            st_depression: 0.0,
            ..PatientInput::default()
        };
        let factors = risk_factors::evaluate(&input);
        assert!(factors.is_empty());
        let assessment = Assessment::new(input, ScoringResult::new(1, [0.05, 0.95]), factors);

        let text = rendered(&assessment);
        assert!(text.contains("LOW (5.0%)"));
        assert!(text.contains(NO_FACTORS_MESSAGE));
        assert!(text.contains("Explanation"));
        assert!(text.contains("strongly associated with increased cardiovascular risk"));
    }
}
