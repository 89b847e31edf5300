//! Patient input record for cardiovascular risk prediction.
//!
//! Fields follow the 13-column clinical schema the classifier was trained on
//! (age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang, oldpeak, slope, ca, thal).

use serde::{Deserialize, Serialize};

use crate::CardioriskError;

/// Inclusive bounds for the numeric fields, matching the input form widgets.
pub const AGE_RANGE: (u8, u8) = (1, 120);
pub const RESTING_BP_RANGE: (u16, u16) = (50, 250);
pub const CHOLESTEROL_RANGE: (u16, u16) = (100, 600);
pub const MAX_HEART_RATE_RANGE: (u16, u16) = (60, 220);
pub const ST_DEPRESSION_RANGE: (f64, f64) = (0.0, 10.0);
pub const MAJOR_VESSELS_MAX: u8 = 3;

/// Biological sex as encoded by the training data (1 = male, 0 = female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    /// # Errors
    /// Returns `InvalidInput` for any code other than 0 or 1.
    pub fn from_code(code: u8) -> Result<Self, CardioriskError> {
        match code {
            0 => Ok(Self::Female),
            1 => Ok(Self::Male),
            other => Err(CardioriskError::InvalidInput(format!(
                "sex code {other} must be 0 or 1"
            ))),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

/// Chest pain type (`cp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl ChestPainType {
    pub const ALL: [Self; 4] = [
        Self::TypicalAngina,
        Self::AtypicalAngina,
        Self::NonAnginalPain,
        Self::Asymptomatic,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::TypicalAngina => 0,
            Self::AtypicalAngina => 1,
            Self::NonAnginalPain => 2,
            Self::Asymptomatic => 3,
        }
    }

    /// # Errors
    /// Returns `InvalidInput` for codes outside 0-3.
    pub fn from_code(code: u8) -> Result<Self, CardioriskError> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| {
                CardioriskError::InvalidInput(format!("chest pain type {code} out of range [0, 3]"))
            })
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TypicalAngina => "Typical Angina",
            Self::AtypicalAngina => "Atypical Angina",
            Self::NonAnginalPain => "Non-anginal Pain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }
}

/// Resting electrocardiographic result (`restecg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LvHypertrophy,
}

impl RestingEcg {
    pub const ALL: [Self; 3] = [Self::Normal, Self::StTAbnormality, Self::LvHypertrophy];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::StTAbnormality => 1,
            Self::LvHypertrophy => 2,
        }
    }

    /// # Errors
    /// Returns `InvalidInput` for codes outside 0-2.
    pub fn from_code(code: u8) -> Result<Self, CardioriskError> {
        Self::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or_else(|| {
                CardioriskError::InvalidInput(format!("resting ECG {code} out of range [0, 2]"))
            })
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTAbnormality => "ST-T Abnormality",
            Self::LvHypertrophy => "LV Hypertrophy",
        }
    }
}

/// Slope of the peak exercise ST segment (`slope`).
///
/// Training encoding: 0 = downsloping (worst), 1 = flat, 2 = upsloping (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StSlope {
    Downsloping,
    Flat,
    Upsloping,
}

impl StSlope {
    pub const ALL: [Self; 3] = [Self::Downsloping, Self::Flat, Self::Upsloping];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Downsloping => 0,
            Self::Flat => 1,
            Self::Upsloping => 2,
        }
    }

    /// # Errors
    /// Returns `InvalidInput` for codes outside 0-2.
    pub fn from_code(code: u8) -> Result<Self, CardioriskError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| {
                CardioriskError::InvalidInput(format!("ST slope {code} out of range [0, 2]"))
            })
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Downsloping => "Downsloping",
            Self::Flat => "Flat",
            Self::Upsloping => "Upsloping",
        }
    }
}

/// Thalassemia (`thal`).
///
/// Code 0 marks a missing value in the training data and is never a valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Thalassemia {
    FixedDefect,
    Normal,
    ReversibleDefect,
}

impl Thalassemia {
    pub const ALL: [Self; 3] = [Self::FixedDefect, Self::Normal, Self::ReversibleDefect];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::FixedDefect => 1,
            Self::Normal => 2,
            Self::ReversibleDefect => 3,
        }
    }

    /// # Errors
    /// Returns `InvalidInput` for code 0 (reserved) and anything above 3.
    pub fn from_code(code: u8) -> Result<Self, CardioriskError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| {
                CardioriskError::InvalidInput(format!(
                    "thalassemia {code} must be 1, 2 or 3 (0 is reserved)"
                ))
            })
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FixedDefect => "Fixed Defect",
            Self::Normal => "Normal",
            Self::ReversibleDefect => "Reversible Defect",
        }
    }
}

/// Clinical vitals collected by the input form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in years (1-120)
    pub age: u8,

    pub sex: Sex,

    /// Resting blood pressure in mm Hg (50-250)
    pub resting_bp: u16,

    /// Serum cholesterol in mg/dl (100-600)
    pub cholesterol: u16,

    /// Fasting blood sugar > 120 mg/dl
    pub fasting_blood_sugar: bool,

    pub chest_pain_type: ChestPainType,

    /// Maximum heart rate achieved (60-220)
    pub max_heart_rate: u16,

    pub exercise_induced_angina: bool,

    pub resting_ecg: RestingEcg,

    /// ST depression induced by exercise relative to rest ("oldpeak", 0.0-10.0)
    pub st_depression: f64,

    pub st_slope: StSlope,

    /// Number of major vessels colored by fluoroscopy (0-3)
    pub major_vessels: u8,

    pub thalassemia: Thalassemia,
}

impl Default for PatientInput {
    /// Session default shown on the first form render.
    fn default() -> Self {
        Self {
            age: 58,
            sex: Sex::Male,
            resting_bp: 140,
            cholesterol: 240,
            fasting_blood_sugar: false,
            chest_pain_type: ChestPainType::TypicalAngina,
            max_heart_rate: 150,
            exercise_induced_angina: false,
            resting_ecg: RestingEcg::Normal,
            st_depression: 1.0,
            st_slope: StSlope::Flat,
            major_vessels: 0,
            thalassemia: Thalassemia::Normal,
        }
    }
}

impl PatientInput {
    /// Validate that all numeric fields are within their declared domains.
    ///
    /// Categorical fields are valid by construction.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&self.age) {
            errors.push(format!(
                "Age {} out of range [{}, {}]",
                self.age, AGE_RANGE.0, AGE_RANGE.1
            ));
        }
        if !(RESTING_BP_RANGE.0..=RESTING_BP_RANGE.1).contains(&self.resting_bp) {
            errors.push(format!(
                "Resting BP {} out of range [{}, {}]",
                self.resting_bp, RESTING_BP_RANGE.0, RESTING_BP_RANGE.1
            ));
        }
        if !(CHOLESTEROL_RANGE.0..=CHOLESTEROL_RANGE.1).contains(&self.cholesterol) {
            errors.push(format!(
                "Cholesterol {} out of range [{}, {}]",
                self.cholesterol, CHOLESTEROL_RANGE.0, CHOLESTEROL_RANGE.1
            ));
        }
        if !(MAX_HEART_RATE_RANGE.0..=MAX_HEART_RATE_RANGE.1).contains(&self.max_heart_rate) {
            errors.push(format!(
                "Max heart rate {} out of range [{}, {}]",
                self.max_heart_rate, MAX_HEART_RATE_RANGE.0, MAX_HEART_RATE_RANGE.1
            ));
        }
        if !self.st_depression.is_finite()
            || !(ST_DEPRESSION_RANGE.0..=ST_DEPRESSION_RANGE.1).contains(&self.st_depression)
        {
            errors.push(format!(
                "ST depression {} out of range [{}, {}]",
                self.st_depression, ST_DEPRESSION_RANGE.0, ST_DEPRESSION_RANGE.1
            ));
        }
        if self.major_vessels > MAJOR_VESSELS_MAX {
            errors.push(format!(
                "Major vessels {} out of range [0, {}]",
                self.major_vessels, MAJOR_VESSELS_MAX
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Like [`validate`](Self::validate), folded into a single `InvalidInput` error.
    ///
    /// # Errors
    /// Returns `InvalidInput` listing every violated domain.
    pub fn ensure_valid(&self) -> Result<(), CardioriskError> {
        self.validate()
            .map_err(|errors| CardioriskError::InvalidInput(errors.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let input = PatientInput::default();
        assert!(input.validate().is_ok());
        assert_eq!(input.age, 58);
        assert_eq!(input.thalassemia, Thalassemia::Normal);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let invalid = PatientInput {
            age: 0,
            resting_bp: 300,
            st_depression: f64::NAN,
            major_vessels: 4,
            ..PatientInput::default()
        };
        let errors = invalid.validate().expect_err("should be invalid");
        assert_eq!(errors.len(), 4);
        assert!(matches!(
            invalid.ensure_valid(),
            Err(CardioriskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_thalassemia_zero_is_rejected() {
        assert!(Thalassemia::from_code(0).is_err());
        assert!(Thalassemia::from_code(4).is_err());
        assert_eq!(Thalassemia::from_code(3).unwrap(), Thalassemia::ReversibleDefect);
    }

    #[test]
    fn test_category_codes_roundtrip() {
        for cp in ChestPainType::ALL {
            assert_eq!(ChestPainType::from_code(cp.code()).unwrap(), cp);
        }
        for ecg in RestingEcg::ALL {
            assert_eq!(RestingEcg::from_code(ecg.code()).unwrap(), ecg);
        }
        for slope in StSlope::ALL {
            assert_eq!(StSlope::from_code(slope.code()).unwrap(), slope);
        }
        assert!(StSlope::from_code(3).is_err());
        assert!(Sex::from_code(2).is_err());
    }
}
