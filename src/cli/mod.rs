// CLI module for scentwise
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// scentwise - fragrance recommendation endpoint backed by Gemini
#[derive(Parser, Debug, Default)]
#[command(name = "scentwise", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.scentwise/config.toml if present)
    #[arg(long, env = "SCENTWISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
