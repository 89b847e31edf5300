//! Assessment service: encode → score → explain.

use std::sync::Arc;

use crate::domain::{risk_factors, Assessment, PatientInput};
use crate::ports::RiskModel;
use crate::CardioriskError;

/// Runs one full scoring pass for a patient record.
///
/// The model is loaded once at startup and shared read-only, so the
/// service is cheap to clone into every session.
pub struct AssessmentService<M>
where
    M: RiskModel,
{
    model: Arc<M>,
}

impl<M> Clone for AssessmentService<M>
where
    M: RiskModel,
{
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}

impl<M> AssessmentService<M>
where
    M: RiskModel,
{
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Score a patient record and derive its risk factors.
    ///
    /// Risk factors come from the raw input, not from the model.
    ///
    /// # Errors
    /// Returns `InvalidInput` for out-of-domain fields and `ModelUnavailable`
    /// if the model cannot produce a probability.
    pub fn assess(&self, input: &PatientInput) -> Result<Assessment, CardioriskError> {
        tracing::debug!("Step 1: Encoding patient input...");
        let features = self.model.encode(input)?;

        tracing::debug!("Step 2: Scoring {} features...", features.len());
        let scoring = self.model.score(&features)?;

        tracing::debug!("Step 3: Evaluating risk factors...");
        let factors = risk_factors::evaluate(input);

        tracing::info!(
            "Assessment complete: class={}, risk={}, factors={}",
            scoring.predicted_class,
            scoring.risk_level(),
            factors.len()
        );

        Ok(Assessment::new(input.clone(), scoring, factors))
    }
}
