// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `GEMINI_API_KEY` (highest, credential only)
    /// 2. Environment variables (`SCENTWISE__SECTION__KEY`)
    /// 3. Config file (`path`, or `~/.scentwise/config.toml` if present)
    /// 4. Defaults (lowest)
    ///
    /// An explicitly given `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::from(Self::default_config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // Override with environment variables (prefix: SCENTWISE__)
            .add_source(
                Environment::with_prefix("SCENTWISE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("gemini.models")
                    .try_parsing(true),
            )
            .set_override_option("gemini.api_key", api_key)?
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scentwise")
            .join("config.toml")
    }
}
