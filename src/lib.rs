//! # Cardiorisk
//!
//! Heart-disease risk prediction from clinical vitals.
//!
//! This crate provides:
//! - A fixed-order feature encoding of a patient record
//! - Scoring through a pre-fitted feature scaler and logistic classifier
//! - Threshold-based clinical risk factors
//! - A two-screen terminal UI (input form, result view)
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientInput, FeatureVector, ScoringResult, RiskFactor)
//! - `ports`: Trait definitions for the model boundary
//! - `adapters`: Concrete implementations (JSON logistic model, log sanitizer)
//! - `application`: Use cases (assessment pipeline, session router)
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, FeatureVector, PatientInput, RiskFactor, RiskLevel, ScoringResult};

/// Result type for Cardiorisk operations
pub type Result<T> = std::result::Result<T, CardioriskError>;

/// Main error type for Cardiorisk
#[derive(Debug, thiserror::Error)]
pub enum CardioriskError {
    /// Scaler or classifier could not be loaded. Fatal: no prediction is possible.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid patient input: {0}")]
    InvalidInput(String),

    #[error("Invalid page transition: {0}")]
    InvalidTransition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
