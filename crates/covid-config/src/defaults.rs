//! Default values for every configuration section.

use crate::schema::*;
use chrono::NaiveDate;
use covid_common::Divisor;
use std::path::PathBuf;

/// Default base URL of the covid19tracker.ca API.
pub const DEFAULT_TRACKER_URL: &str = "https://api.covid19tracker.ca";

/// Default download URL of the Our World in Data CSV.
pub const DEFAULT_OWID_CSV_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";

/// Default local file name of the Our World in Data CSV.
pub const DEFAULT_OWID_CSV_FILE: &str = "owid-covid-data.csv";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default rolling window width in days.
pub const DEFAULT_WINDOW_SIZE: usize = 7;

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            aggregation: AggregationSection::default(),
            charts: ChartsConfig::default(),
            telegram: TelegramConfig::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tracker_url: DEFAULT_TRACKER_URL.to_string(),
            owid_csv_path: PathBuf::from(DEFAULT_OWID_CSV_FILE),
            owid_csv_url: DEFAULT_OWID_CSV_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for AggregationSection {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            divisor: Divisor::FixedWindow,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            width: 1600,
            height: 1200,
            background_color: "#ffffff".to_string(),
            vaccination_cutoff: NaiveDate::from_ymd_opt(2020, 12, 15).unwrap_or_default(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
        }
    }
}
