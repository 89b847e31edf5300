//! Fixed-order feature encoding.
//!
//! The column order is the one the scaler and classifier were fit with and
//! cannot change without re-exporting both artifacts.

use serde::{Deserialize, Serialize};

use super::patient::{ChestPainType, PatientInput, RestingEcg, Sex, StSlope, Thalassemia};
use crate::CardioriskError;

/// Number of model features.
pub const NUM_FEATURES: usize = 13;

/// Feature names in model schema order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Numeric model input: one value per [`FEATURE_NAMES`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    /// Encode a patient record in schema order.
    ///
    /// # Errors
    /// Returns `InvalidInput` if any field is outside its domain.
    pub fn encode(input: &PatientInput) -> Result<Self, CardioriskError> {
        input.ensure_valid()?;

        Ok(Self([
            f64::from(input.age),
            f64::from(input.sex.code()),
            f64::from(input.chest_pain_type.code()),
            f64::from(input.resting_bp),
            f64::from(input.cholesterol),
            bool_feature(input.fasting_blood_sugar),
            f64::from(input.resting_ecg.code()),
            f64::from(input.max_heart_rate),
            bool_feature(input.exercise_induced_angina),
            input.st_depression,
            f64::from(input.st_slope.code()),
            f64::from(input.major_vessels),
            f64::from(input.thalassemia.code()),
        ]))
    }

    /// Create a vector from raw values.
    ///
    /// # Errors
    /// Returns error if the slice length is not 13.
    pub fn from_slice(values: &[f64]) -> Result<Self, CardioriskError> {
        let arr: [f64; NUM_FEATURES] = values.try_into().map_err(|_| {
            CardioriskError::InvalidInput(format!(
                "Expected {NUM_FEATURES} features, got {}",
                values.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Recover the named patient fields from an encoded vector.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a value is not a valid encoding of its field.
    pub fn decode(&self) -> Result<PatientInput, CardioriskError> {
        let v = &self.0;
        let input = PatientInput {
            age: integral(v[0], "age")?,
            sex: Sex::from_code(integral(v[1], "sex")?)?,
            chest_pain_type: ChestPainType::from_code(integral(v[2], "cp")?)?,
            resting_bp: integral(v[3], "trestbps")?,
            cholesterol: integral(v[4], "chol")?,
            fasting_blood_sugar: flag(v[5], "fbs")?,
            resting_ecg: RestingEcg::from_code(integral(v[6], "restecg")?)?,
            max_heart_rate: integral(v[7], "thalach")?,
            exercise_induced_angina: flag(v[8], "exang")?,
            st_depression: v[9],
            st_slope: StSlope::from_code(integral(v[10], "slope")?)?,
            major_vessels: integral(v[11], "ca")?,
            thalassemia: Thalassemia::from_code(integral(v[12], "thal")?)?,
        };
        input.ensure_valid()?;
        Ok(input)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        NUM_FEATURES
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pair each value with its schema column name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

fn bool_feature(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn integral<T: TryFrom<i64>>(value: f64, name: &str) -> Result<T, CardioriskError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(CardioriskError::InvalidInput(format!(
            "{name} must be a whole number, got {value}"
        )));
    }
    T::try_from(value as i64)
        .map_err(|_| CardioriskError::InvalidInput(format!("{name} value {value} out of range")))
}

fn flag(value: f64, name: &str) -> Result<bool, CardioriskError> {
    match integral::<u8>(value, name)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(CardioriskError::InvalidInput(format!(
            "{name} must be 0 or 1, got {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_default_in_schema_order() {
        let v = FeatureVector::encode(&PatientInput::default()).expect("Should encode");
        assert_eq!(v.len(), NUM_FEATURES);
        assert_eq!(
            v.as_slice(),
            &[58.0, 1.0, 0.0, 140.0, 240.0, 0.0, 0.0, 150.0, 0.0, 1.0, 1.0, 0.0, 2.0]
        );
    }

    #[test]
    fn test_encode_booleans_and_categories() {
        let input = PatientInput {
            sex: Sex::Female,
            fasting_blood_sugar: true,
            exercise_induced_angina: true,
            chest_pain_type: ChestPainType::Asymptomatic,
            resting_ecg: RestingEcg::LvHypertrophy,
            st_slope: StSlope::Upsloping,
            thalassemia: Thalassemia::ReversibleDefect,
            ..PatientInput::default()
        };
        let v = FeatureVector::encode(&input).expect("Should encode");
        let named: Vec<_> = v.named().collect();
        assert_eq!(named[1], ("sex", 0.0));
        assert_eq!(named[2], ("cp", 3.0));
        assert_eq!(named[5], ("fbs", 1.0));
        assert_eq!(named[6], ("restecg", 2.0));
        assert_eq!(named[8], ("exang", 1.0));
        assert_eq!(named[10], ("slope", 2.0));
        assert_eq!(named[12], ("thal", 3.0));
    }

    #[test]
    fn test_encode_rejects_out_of_domain() {
        let input = PatientInput {
            cholesterol: 50,
            ..PatientInput::default()
        };
        assert!(matches!(
            FeatureVector::encode(&input),
            Err(CardioriskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_recovers_input() {
        let input = PatientInput {
            age: 67,
            sex: Sex::Female,
            resting_bp: 160,
            cholesterol: 286,
            fasting_blood_sugar: true,
            chest_pain_type: ChestPainType::NonAnginalPain,
            max_heart_rate: 108,
            exercise_induced_angina: true,
            resting_ecg: RestingEcg::StTAbnormality,
            st_depression: 3.5,
            st_slope: StSlope::Downsloping,
            major_vessels: 3,
            thalassemia: Thalassemia::FixedDefect,
        };
        let v = FeatureVector::encode(&input).expect("Should encode");
        assert_eq!(v.decode().expect("Should decode"), input);
    }

    #[test]
    fn test_from_slice_length_and_decode_errors() {
        assert!(FeatureVector::from_slice(&[1.0; 12]).is_err());

        let mut raw = [58.0, 1.0, 0.0, 140.0, 240.0, 0.0, 0.0, 150.0, 0.0, 1.0, 1.0, 0.0, 2.0];
        raw[12] = 0.0;
        let v = FeatureVector::from_slice(&raw).expect("length is fine");
        assert!(v.decode().is_err(), "thal 0 must not decode");

        raw[12] = 2.0;
        raw[0] = 58.5;
        let v = FeatureVector::from_slice(&raw).expect("length is fine");
        assert!(v.decode().is_err(), "fractional age must not decode");
    }
}
