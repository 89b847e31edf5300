//! Threshold-based clinical risk factors.
//!
//! These are fixed heuristics over the raw input record and are independent of
//! the classifier's weights.

use serde::{Deserialize, Serialize};

use super::patient::{ChestPainType, PatientInput};

pub const CHOLESTEROL_THRESHOLD: u16 = 200;
pub const RESTING_BP_THRESHOLD: u16 = 130;
pub const AGE_THRESHOLD: u8 = 55;
pub const MAX_HEART_RATE_THRESHOLD: u16 = 180;
pub const ST_DEPRESSION_THRESHOLD: f64 = 2.0;

/// A rule that fired for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    HighCholesterol,
    ElevatedBloodPressure,
    HighFastingBloodSugar,
    AgeAbove55,
    HighMaxHeartRate,
    ChestPainReported,
    ExerciseInducedAngina,
    SignificantStDepression,
    /// Carries the number of major vessels detected (1-3)
    MajorVessels(u8),
}

impl RiskFactor {
    /// Threshold hint displayed next to the factor, if the rule has one.
    #[must_use]
    pub fn threshold_note(&self) -> Option<&'static str> {
        match self {
            Self::HighCholesterol => Some("> 200 mg/dl"),
            Self::ElevatedBloodPressure => Some("> 130 mm Hg"),
            Self::HighFastingBloodSugar => Some("> 120 mg/dl"),
            Self::HighMaxHeartRate => Some("> 180"),
            Self::SignificantStDepression => Some("> 2.0"),
            Self::AgeAbove55
            | Self::ChestPainReported
            | Self::ExerciseInducedAngina
            | Self::MajorVessels(_) => None,
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighCholesterol => write!(f, "High Cholesterol"),
            Self::ElevatedBloodPressure => write!(f, "Elevated Blood Pressure"),
            Self::HighFastingBloodSugar => write!(f, "High Fasting Blood Sugar"),
            Self::AgeAbove55 => write!(f, "Age above 55"),
            Self::HighMaxHeartRate => write!(f, "High Max Heart Rate"),
            Self::ChestPainReported => write!(f, "Chest Pain Reported"),
            Self::ExerciseInducedAngina => write!(f, "Exercise Induced Angina"),
            Self::SignificantStDepression => write!(f, "Significant ST Depression"),
            Self::MajorVessels(n) => write!(f, "{n} Major Vessels Detected"),
        }
    }
}

/// Evaluate every rule against the raw input, in fixed rule order.
///
/// An empty result means no rule fired.
#[must_use]
pub fn evaluate(input: &PatientInput) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if input.cholesterol > CHOLESTEROL_THRESHOLD {
        factors.push(RiskFactor::HighCholesterol);
    }
    if input.resting_bp > RESTING_BP_THRESHOLD {
        factors.push(RiskFactor::ElevatedBloodPressure);
    }
    if input.fasting_blood_sugar {
        factors.push(RiskFactor::HighFastingBloodSugar);
    }
    if input.age > AGE_THRESHOLD {
        factors.push(RiskFactor::AgeAbove55);
    }
    if input.max_heart_rate > MAX_HEART_RATE_THRESHOLD {
        factors.push(RiskFactor::HighMaxHeartRate);
    }
    if input.chest_pain_type != ChestPainType::TypicalAngina {
        factors.push(RiskFactor::ChestPainReported);
    }
    if input.exercise_induced_angina {
        factors.push(RiskFactor::ExerciseInducedAngina);
    }
    if input.st_depression > ST_DEPRESSION_THRESHOLD {
        factors.push(RiskFactor::SignificantStDepression);
    }
    if input.major_vessels > 0 {
        factors.push(RiskFactor::MajorVessels(input.major_vessels));
    }

    factors
}
