//! Risk model port: Trait for the pre-fitted scaler + classifier pair.
//!
//! The concrete artifact format (JSON export, embedded constants, ...) is an
//! adapter detail; the application only sees `encode` and `score`.

use crate::domain::{FeatureVector, PatientInput, ScoringResult};
use crate::CardioriskError;

/// Trait for scoring patient records.
///
/// Implementations are loaded once at startup and shared read-only
/// by every session, hence `Send + Sync`.
pub trait RiskModel: Send + Sync {
    /// Encode a patient record into the model's feature order.
    ///
    /// # Errors
    /// Returns `CardioriskError::InvalidInput` if a field is outside its domain.
    fn encode(&self, input: &PatientInput) -> Result<FeatureVector, CardioriskError> {
        FeatureVector::encode(input)
    }

    /// Apply the fitted scaler, then the fitted classifier.
    ///
    /// The returned `class_probabilities[0]` is the probability of disease.
    ///
    /// # Errors
    /// Returns `CardioriskError::ModelUnavailable` if the model cannot produce
    /// a valid probability distribution.
    fn score(&self, features: &FeatureVector) -> Result<ScoringResult, CardioriskError>;
}
