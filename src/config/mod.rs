use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;

/// Configuration for the console
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Root address of the rental backend API
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Directory receiving the rolling log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file, when present, are loaded first.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, base_url: Option<String>, log_dir: Option<PathBuf>) -> Self {
        if let Some(url) = base_url {
            self.api_base_url = url;
        }
        if let Some(dir) = log_dir {
            self.log_dir = dir;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
