//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two pages driven by the session router:
//! - Patient data input
//! - Risk assessment result

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
