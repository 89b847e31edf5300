//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: JSON-exported scaler + logistic regression
//! - `sanitize`: patient-data filtering for logs

pub mod logistic;
pub mod sanitize;

pub use logistic::LogisticModel;
