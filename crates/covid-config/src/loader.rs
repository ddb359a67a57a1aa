//! Configuration loading utilities

use crate::Config;
use covid_common::{CovidError, Result as CovidResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "COVID_BOT_CONFIG";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] CovidError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for CovidError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config(other.to_string()),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!("Reading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text without overrides or validation
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from an explicit path, `COVID_BOT_CONFIG`, or
    /// `config.toml` in the working directory, falling back to defaults
    pub fn load(explicit: Option<&Path>) -> CovidResult<Config> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
            .or_else(|| {
                let default = PathBuf::from("config.toml");
                default.exists().then_some(default)
            });

        let config = if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            Self::load_config(path)?
        } else {
            info!("No configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate()?;
            config
        };

        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(url) = lookup("TRACKER_URL") {
            config.sources.tracker_url = url;
        }

        if let Some(path) = lookup("OWID_CSV_PATH") {
            config.sources.owid_csv_path = PathBuf::from(path);
        }

        if let Some(url) = lookup("OWID_CSV_URL") {
            config.sources.owid_csv_url = url;
        }

        if let Some(timeout) = lookup("HTTP_TIMEOUT") {
            config.sources.timeout_seconds = parse_var("HTTP_TIMEOUT", &timeout)?;
        }

        // Aggregation overrides
        if let Some(window) = lookup("ROLLING_WINDOW") {
            config.aggregation.window_size = parse_var("ROLLING_WINDOW", &window)?;
        }

        // Chart overrides
        if let Some(dir) = lookup("CHART_OUTPUT_DIR") {
            config.charts.output_dir = PathBuf::from(dir);
        }

        // Telegram overrides
        if let Some(token) = lookup("TELEGRAM_TOKEN") {
            config.telegram.token = token;
        }

        if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID") {
            config.telegram.chat_id = chat_id;
        }

        // Logging overrides
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
