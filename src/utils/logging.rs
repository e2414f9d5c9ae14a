//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper that keeps
//! Gemini API keys out of log sinks and error details.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

static API_KEY_PATTERN: OnceLock<Regex> = OnceLock::new();
static KEY_PARAM_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Sanitizes sensitive information from log messages.
///
/// Replaces Google API keys (`AIza` followed by 35 key characters) and the
/// value of any `key=` query parameter with a `\[REDACTED\]` placeholder.
pub fn sanitize(input: &str) -> String {
    let api_key = API_KEY_PATTERN
        .get_or_init(|| Regex::new(r"AIza[0-9A-Za-z_\-]{35}").expect("valid API key pattern"));
    let key_param = KEY_PARAM_PATTERN
        .get_or_init(|| Regex::new(r#"([?&]key=)[^&\s"']+"#).expect("valid key param pattern"));

    let result = api_key.replace_all(input, "[REDACTED_API_KEY]");
    key_param.replace_all(&result, "${1}[REDACTED]").into_owned()
}
