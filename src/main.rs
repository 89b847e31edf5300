//! cardiorisk: heart disease risk assessment
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::sanitize::SanitizingMakeWriter;
use cardiorisk::adapters::LogisticModel;
use cardiorisk::application::AssessmentService;
use cardiorisk::config::AppConfig;
use cardiorisk::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // interactive runs log to a file, non-interactive runs to stdout.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {parent:?}"))?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting cardiorisk...");

    // Refuse to start without a usable model, before the terminal is taken over.
    let model = match LogisticModel::load(&config.model_dir, config.require_manifest) {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Model unavailable: {}", e);
            eprintln!(
                "Model files not found or invalid in {:?}: {e}\n\
                 Set CARDIORISK_MODEL_PATH to a directory containing scaler.json and logistic_model.json.",
                config.model_dir
            );
            return Err(e.into());
        }
    };

    let mut app = App::with_dependencies(AssessmentService::new(Arc::new(model)));
    app.run()?;

    tracing::info!("cardiorisk shutdown complete.");
    Ok(())
}
