//! Dark clinical color palette and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLevel;

/// Theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Accent Colors ===

    /// Focus accent
    pub const PRIMARY: Color = Color::Rgb(255, 174, 201); // #FFAEC9

    /// Brighter accent for the cursor
    pub const PRIMARY_LIGHT: Color = Color::Rgb(255, 205, 222); // #FFCDDE

    // === Semantic Colors ===

    /// Low risk
    pub const SUCCESS: Color = Color::Rgb(0, 204, 150); // #00CC96

    /// High risk / errors
    pub const DANGER: Color = Color::Rgb(255, 75, 75); // #FF4B4B

    // === Surfaces ===

    /// Borders
    pub const BORDER: Color = Color::Rgb(74, 74, 74); // #4A4A4A

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(250, 250, 250); // #FAFAFA

    /// Section headings
    pub const TEXT_SECONDARY: Color = Color::Rgb(224, 224, 224); // #E0E0E0

    pub const TEXT_MUTED: Color = Color::Rgb(176, 176, 176); // #B0B0B0

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Section headings ("Demographics", "Risk Summary", ...)
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Left-bar marker in front of each risk factor
    #[must_use]
    pub fn factor_marker() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Risk level style, using the domain color
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        let (r, g, b) = level.color();
        Style::default()
            .fg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD)
    }
}
