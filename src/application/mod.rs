//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the model port to implement
//! the assessment pipeline and the per-session page flow.

mod assessment;
mod session;

pub use assessment::AssessmentService;
pub use session::{Page, SessionContext};
