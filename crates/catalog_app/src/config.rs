use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use catalog_engine::{FetchSettings, DEFAULT_BASE_URL};
use catalog_logging::{LevelFilter, LogDestination};
use clap::ValueEnum;
use serde::Deserialize;

use crate::cli::Args;

pub const DEFAULT_CONFIG_PATH: &str = "./catalog.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogTarget,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_response_bytes: fetch.max_bytes,
            // The terminal is the UI, so logs go to a file unless asked otherwise.
            log_destination: LogTarget::File,
            log_level: "info".to_string(),
            log_file: PathBuf::from("./catalog.log"),
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `./catalog.ron` if it exists, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::read(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.log_level_filter()?;
        Ok(config)
    }

    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(base_url) = &args.base_url {
            self.api_base_url.clone_from(base_url);
        }
        if let Some(log) = args.log {
            self.log_destination = log;
        }
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("unknown log level {:?}", self.log_level))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }
}
