//! Session router: the `input` ⇄ `result` page flow.
//!
//! One `SessionContext` per user session. It is created at session start,
//! mutated only by [`SessionContext::submit`] and [`SessionContext::back`],
//! and dropped when the session ends.

use crate::domain::{Assessment, PatientInput};
use crate::ports::RiskModel;
use crate::CardioriskError;

use super::AssessmentService;

/// Page currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Form accepting a submission
    Input,
    /// Last assessment, accepting "back"
    Result,
}

/// Per-session state: current page, current input and last assessment.
#[derive(Debug, Clone)]
pub struct SessionContext {
    page: Page,
    input: PatientInput,
    last_assessment: Option<Assessment>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// Start a session on the input page with the default patient record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: Page::Input,
            input: PatientInput::default(),
            last_assessment: None,
        }
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// Record used to prefill the next form render.
    #[must_use]
    pub fn input(&self) -> &PatientInput {
        &self.input
    }

    #[must_use]
    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }

    /// Submit the form: `input → result`.
    ///
    /// On any error the session is left untouched (still on `Input`, previous
    /// record kept).
    ///
    /// # Errors
    /// Returns `InvalidTransition` when not on the input page, and whatever the
    /// assessment returns (`InvalidInput`, `ModelUnavailable`).
    pub fn submit<M: RiskModel>(
        &mut self,
        service: &AssessmentService<M>,
        input: PatientInput,
    ) -> Result<&Assessment, CardioriskError> {
        if self.page != Page::Input {
            return Err(CardioriskError::InvalidTransition(
                "submit is only accepted on the input page".to_string(),
            ));
        }

        let assessment = service.assess(&input)?;

        self.input = input;
        self.page = Page::Result;
        tracing::debug!("Session transition: input -> result");
        Ok(self.last_assessment.insert(assessment))
    }

    /// Return to the form: `result → input`. Nothing is discarded.
    ///
    /// # Errors
    /// Returns `InvalidTransition` when not on the result page.
    pub fn back(&mut self) -> Result<(), CardioriskError> {
        if self.page != Page::Result {
            return Err(CardioriskError::InvalidTransition(
                "back is only accepted on the result page".to_string(),
            ));
        }

        self.page = Page::Input;
        tracing::debug!("Session transition: result -> input");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureVector, ScoringResult};
    use std::sync::Arc;

    struct FixedModel;

    impl RiskModel for FixedModel {
        fn score(&self, _features: &FeatureVector) -> Result<ScoringResult, CardioriskError> {
            Ok(ScoringResult::new(0, [0.7, 0.3]))
        }
    }

    fn service() -> AssessmentService<FixedModel> {
        AssessmentService::new(Arc::new(FixedModel))
    }

    #[test]
    fn test_initial_state() {
        let session = SessionContext::new();
        assert_eq!(session.page(), Page::Input);
        assert_eq!(session.input(), &PatientInput::default());
        assert!(session.last_assessment().is_none());
    }

    #[test]
    fn test_submit_lands_on_result() {
        let mut session = SessionContext::new();
        let input = PatientInput {
            age: 63,
            ..PatientInput::default()
        };

        let assessment = session.submit(&service(), input.clone()).expect("submit");
        assert_eq!(assessment.input, input);

        assert_eq!(session.page(), Page::Result);
        assert_eq!(session.input(), &input);
        assert!(session.last_assessment().is_some());
    }

    #[test]
    fn test_back_preserves_input_and_result() {
        let mut session = SessionContext::new();
        let input = PatientInput {
            cholesterol: 310,
            ..PatientInput::default()
        };
        session.submit(&service(), input.clone()).expect("submit");
        session.back().expect("back");

        assert_eq!(session.page(), Page::Input);
        assert_eq!(session.input(), &input);
        assert!(session.last_assessment().is_some());
    }

    #[test]
    fn test_invalid_submission_stays_on_input() {
        let mut session = SessionContext::new();
        let bad = PatientInput {
            resting_bp: 10,
            ..PatientInput::default()
        };

        let err = session.submit(&service(), bad).expect_err("must fail");
        assert!(matches!(err, CardioriskError::InvalidInput(_)));
        assert_eq!(session.page(), Page::Input);
        assert_eq!(session.input(), &PatientInput::default());
        assert!(session.last_assessment().is_none());
    }

    #[test]
    fn test_out_of_order_transitions_rejected() {
        let mut session = SessionContext::new();
        assert!(matches!(
            session.back(),
            Err(CardioriskError::InvalidTransition(_))
        ));

        session
            .submit(&service(), PatientInput::default())
            .expect("submit");
        assert!(matches!(
            session.submit(&service(), PatientInput::default()),
            Err(CardioriskError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_flow_loops() {
        let mut session = SessionContext::new();
        for vessels in 0..3u8 {
            let input = PatientInput {
                major_vessels: vessels,
                ..PatientInput::default()
            };
            session.submit(&service(), input).expect("submit");
            session.back().expect("back");
        }
        assert_eq!(session.input().major_vessels, 2);
    }
}
