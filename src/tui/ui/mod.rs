//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![
            Span::styled("Disclaimer: ", MedicalTheme::focused()),
            Span::styled(
                "This assessment is for informational purposes only and does not replace professional medical advice, diagnosis, or treatment.",
                MedicalTheme::text_muted(),
            ),
        ]),
        Line::from(vec![Span::styled(
            "Calculations are based on statistical models and may not account for individual medical history. Always consult a qualified healthcare provider.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
