//! Main TUI application state machine.
//!
//! Handles:
//! - Page rendering for the session's current page
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::LogisticModel;
use crate::application::{AssessmentService, Page, SessionContext};
use crate::config::AppConfig;

use super::ui::{
    form::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::render_result,
};

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Scoring pipeline, shared read-only
    service: AssessmentService<LogisticModel>,

    /// Page flow and last assessment
    session: SessionContext,

    /// Patient form state
    patient_form_state: PatientFormState,
}

impl App {
    /// Create a new application, loading the model from `config.model_dir`.
    ///
    /// For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded or verified.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let model = LogisticModel::load(&config.model_dir, config.require_manifest)
            .with_context(|| format!("Failed to load model from {:?}", config.model_dir))?;

        Ok(Self::with_dependencies(AssessmentService::new(Arc::new(
            model,
        ))))
    }

    /// Create application with an injected service (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(service: AssessmentService<LogisticModel>) -> Self {
        let session = SessionContext::new();
        let patient_form_state = PatientFormState::from_input(session.input());
        Self {
            should_quit: false,
            service,
            session,
            patient_form_state,
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

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.draw(terminal)?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(f.area());

            let content_area = chunks[0];
            let disclaimer_area = chunks[1];

            match (self.session.page(), self.session.last_assessment()) {
                (Page::Result, Some(assessment)) => render_result(f, content_area, assessment),
                _ => render_patient_form(f, content_area, &self.patient_form_state),
            }

            render_disclaimer(f, disclaimer_area);
        })?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.session.page() {
            Page::Input => self.handle_patient_form_key(key),
            Page::Result => self.handle_result_key(key),
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Left => {
                self.patient_form_state.cycle_choice(false);
            }
            KeyCode::Right => {
                self.patient_form_state.cycle_choice(true);
            }
            KeyCode::Char(c) => {
                self.patient_form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.patient_form_state.delete_char();
            }
            KeyCode::Delete => {
                self.patient_form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Backspace | KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.return_to_form();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let input = match self.patient_form_state.to_patient_input() {
            Ok(input) => input,
            Err(e) => {
                self.patient_form_state.error_message = Some(e);
                return;
            }
        };

        if let Err(errors) = input.validate() {
            self.patient_form_state.error_message = Some(errors.join(", "));
            return;
        }

        match self.session.submit(&self.service, input) {
            Ok(_) => {
                self.patient_form_state.error_message = None;
            }
            Err(e) => {
                tracing::error!("Assessment failed: {}", e);
                self.patient_form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn return_to_form(&mut self) {
        if let Err(e) = self.session.back() {
            tracing::warn!("Ignoring back: {}", e);
            return;
        }
        let selected = self.patient_form_state.selected_field;
        self.patient_form_state = PatientFormState::from_input(self.session.input());
        self.patient_form_state.selected_field = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::path::Path;

    fn create_test_app() -> App {
        let config = AppConfig {
            model_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("models"),
            require_manifest: true,
            ..AppConfig::default()
        };
        App::new(&config).expect("App should build for tests")
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_missing_model_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            model_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        assert!(App::new(&config).is_err());
    }

    #[test]
    fn test_submit_then_back_keeps_edits() {
        let mut app = create_test_app();

        // Age field is focused first: 58 -> 63
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.page(), Page::Result);
        let assessment = app.session.last_assessment().expect("assessment");
        assert_eq!(assessment.input.age, 63);

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.session.page(), Page::Input);
        assert_eq!(app.patient_form_state.to_patient_input().map(|p| p.age), Ok(63));
    }

    #[test]
    fn test_out_of_range_stays_on_form() {
        let mut app = create_test_app();

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.page(), Page::Input);
        assert!(app.session.last_assessment().is_none());
        let message = app.patient_form_state.error_message.clone().expect("error shown");
        assert!(message.contains("Age 0 out of range"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit, "plain q is text input on the form");

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_draws_each_page() {
        let mut app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).expect("terminal");

        app.draw(&mut terminal).expect("draw form");
        press(&mut app, KeyCode::Enter);
        app.draw(&mut terminal).expect("draw result");

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("HIGH (68.8%)"));
        assert!(text.contains("Disclaimer"));
    }
}
