use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub resume_data_path: PathBuf,
    pub export_dir: PathBuf,
    /// Pause between the two artifacts of a combined export.
    pub export_settle: Duration,
    /// Unset means the CAPTCHA relay answers with a configuration error.
    pub recaptcha_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            resume_data_path: PathBuf::from(env_or("RESUME_DATA_PATH", "data/resume.json")),
            export_dir: PathBuf::from(env_or("EXPORT_DIR", "exports")),
            export_settle: Duration::from_millis(
                env_or("EXPORT_SETTLE_MS", "500")
                    .parse::<u64>()
                    .context("EXPORT_SETTLE_MS must be a whole number of milliseconds")?,
            ),
            recaptcha_secret: optional_env("RECAPTCHA_SECRET_KEY"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

