//! Configuration schema definitions using serde.

use chrono::NaiveDate;
use covid_common::{CovidError, Divisor, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data source configuration.
    pub sources: SourcesConfig,
    /// Rolling average configuration.
    pub aggregation: AggregationSection,
    /// Chart output configuration.
    pub charts: ChartsConfig,
    /// Telegram posting configuration.
    pub telegram: TelegramConfig,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Where series are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Base URL of the covid19tracker.ca API.
    pub tracker_url: String,
    /// Local path of the Our World in Data CSV.
    pub owid_csv_path: PathBuf,
    /// URL the OWID CSV is downloaded from when the local file is missing.
    pub owid_csv_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Rolling average configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSection {
    /// Width of the rolling window in days.
    pub window_size: usize,
    /// Divisor used before the window has filled.
    pub divisor: Divisor,
}

/// Chart output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Directory chart images are written to.
    pub output_dir: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background color in `#rrggbb` form.
    pub background_color: String,
    /// Vaccination charts only show days after this date.
    pub vaccination_cutoff: NaiveDate,
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token.
    pub token: String,
    /// Target chat ID or `@channel` name.
    pub chat_id: String,
    /// Base URL of the Bot API.
    pub api_url: String,
}

/// Logging configuration as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level filter.
    pub level: String,
    /// Whether to log JSON lines.
    pub json_format: bool,
    /// Optional log file.
    pub file_path: Option<String>,
}

impl From<&LoggingSection> for LoggingConfig {
    fn from(section: &LoggingSection) -> Self {
        Self {
            level: section.level.clone(),
            json_format: section.json_format,
            file_path: section.file_path.clone(),
            ..Self::default()
        }
    }
}

impl TelegramConfig {
    /// Whether enough is configured to post messages.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.chat_id.is_empty()
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CovidError> {
        if self.aggregation.window_size == 0 {
            return Err(CovidError::validation_field(
                "Rolling window must span at least one day",
                "aggregation.window_size",
            ));
        }

        url::Url::parse(&self.sources.tracker_url).map_err(|e| {
            CovidError::config_with_source(
                format!("Invalid tracker URL '{}'", self.sources.tracker_url),
                e,
            )
        })?;

        if !self.sources.owid_csv_url.is_empty() {
            url::Url::parse(&self.sources.owid_csv_url).map_err(|e| {
                CovidError::config_with_source(
                    format!("Invalid OWID CSV URL '{}'", self.sources.owid_csv_url),
                    e,
                )
            })?;
        }

        if self.sources.timeout_seconds == 0 {
            return Err(CovidError::validation_field(
                "Timeout must be greater than 0",
                "sources.timeout_seconds",
            ));
        }

        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(CovidError::validation_field(
                "Chart dimensions must be non-zero",
                "charts",
            ));
        }

        if !is_hex_color(&self.charts.background_color) {
            return Err(CovidError::validation_field(
                format!("Invalid color '{}'", self.charts.background_color),
                "charts.background_color",
            ));
        }

        Ok(())
    }

    /// Validates that posting to Telegram is possible.
    pub fn validate_telegram(&self) -> Result<(), CovidError> {
        if self.telegram.token.is_empty() {
            return Err(CovidError::config("Telegram token cannot be empty"));
        }
        if self.telegram.chat_id.is_empty() {
            return Err(CovidError::config("Telegram chat ID cannot be empty"));
        }
        Ok(())
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
