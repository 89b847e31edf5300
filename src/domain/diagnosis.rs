//! Scoring result types.
//!
//! Label polarity follows the trained classifier: class 0 is disease-positive
//! (high risk) and class 1 is disease-negative (low risk).

use serde::{Deserialize, Serialize};

use super::patient::PatientInput;
use super::risk_factors::RiskFactor;

/// Class label for disease-positive (high risk).
pub const CLASS_DISEASE: u8 = 0;

/// Class label for disease-negative (low risk).
pub const CLASS_HEALTHY: u8 = 1;

/// Qualitative risk level shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::High => "High risk - Consultation advised",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (0, 204, 150),   // #00CC96
            Self::High => (255, 75, 75), // #FF4B4B
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Output of the classifier for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Predicted class (0 = disease, 1 = no disease)
    pub predicted_class: u8,

    /// Probability mass per class, indexed by class label
    pub class_probabilities: [f64; 2],
}

impl ScoringResult {
    /// Create a scoring result from a class label and its probability pair.
    #[must_use]
    pub fn new(predicted_class: u8, class_probabilities: [f64; 2]) -> Self {
        Self {
            predicted_class,
            class_probabilities,
        }
    }

    /// Probability of heart disease: always the class-0 mass, whichever class won.
    #[must_use]
    pub fn probability_of_disease(&self) -> f64 {
        self.class_probabilities[usize::from(CLASS_DISEASE)]
    }

    /// HIGH iff the predicted class is 0.
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        if self.predicted_class == CLASS_DISEASE {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Display string such as `HIGH (68.8%)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} ({:.1}%)",
            self.risk_level(),
            self.probability_of_disease() * 100.0
        )
    }
}

/// One complete pass through the pipeline, as shown on the result screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// The record that was scored
    pub input: PatientInput,

    pub scoring: ScoringResult,

    /// Threshold rules that fired, in rule order
    pub risk_factors: Vec<RiskFactor>,

    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    #[must_use]
    pub fn new(input: PatientInput, scoring: ScoringResult, risk_factors: Vec<RiskFactor>) -> Self {
        Self {
            input,
            scoring,
            risk_factors,
            assessed_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        self.scoring.risk_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_follows_class_zero() {
        let high = ScoringResult::new(0, [0.67, 0.33]);
        assert_eq!(high.risk_level(), RiskLevel::High);
        assert!((high.probability_of_disease() - 0.67).abs() < f64::EPSILON);

        let low = ScoringResult::new(1, [0.2, 0.8]);
        assert_eq!(low.risk_level(), RiskLevel::Low);
        // Still the class-0 mass, not the winning class.
        assert!((low.probability_of_disease() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_format() {
        assert_eq!(ScoringResult::new(0, [0.6877, 0.3123]).summary(), "HIGH (68.8%)");
        assert_eq!(ScoringResult::new(1, [0.006, 0.994]).summary(), "LOW (0.6%)");
    }

    #[test]
    fn test_assessment_creation() {
        let scoring = ScoringResult::new(1, [0.1, 0.9]);
        let assessment = Assessment::new(PatientInput::default(), scoring, Vec::new());
        assert_eq!(assessment.risk_level(), RiskLevel::Low);
        assert!(assessment.risk_factors.is_empty());
    }
}
