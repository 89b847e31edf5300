//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. All types are serializable and
//! validate against the model's training schema.

mod diagnosis;
mod features;
mod patient;
pub mod risk_factors;

pub use diagnosis::{Assessment, RiskLevel, ScoringResult, CLASS_DISEASE, CLASS_HEALTHY};
pub use features::{FeatureVector, FEATURE_NAMES, NUM_FEATURES};
pub use patient::{
    ChestPainType, PatientInput, RestingEcg, Sex, StSlope, Thalassemia, AGE_RANGE,
    CHOLESTEROL_RANGE, MAJOR_VESSELS_MAX, MAX_HEART_RATE_RANGE, RESTING_BP_RANGE,
    ST_DEPRESSION_RANGE,
};
pub use risk_factors::RiskFactor;
