//! Runtime configuration from environment variables.
//!
//! | Variable                      | Default          |
//! |-------------------------------|------------------|
//! | `CARDIORISK_MODEL_PATH`       | `models`         |
//! | `CARDIORISK_REQUIRE_MANIFEST` | `false`          |
//! | `CARDIORISK_LOG_MODE`         | `auto`           |
//! | `CARDIORISK_LOG_FILE`         | `cardiorisk.log` |

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "CARDIORISK_MODEL_PATH";
pub const REQUIRE_MANIFEST_ENV: &str = "CARDIORISK_REQUIRE_MANIFEST";
pub const LOG_MODE_ENV: &str = "CARDIORISK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIORISK_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `scaler.json`, `logistic_model.json` and optionally `manifest.json`
    pub model_dir: PathBuf,
    pub require_manifest: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            require_manifest: false,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("cardiorisk.log"),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            model_dir: lookup(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            require_manifest: lookup(REQUIRE_MANIFEST_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.require_manifest),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}
