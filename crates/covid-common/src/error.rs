//! Error types and utilities for the COVID statistics bot

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, CovidError>;

/// Main error type shared by every crate in the workspace
#[derive(Error, Debug)]
pub enum CovidError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data source or the Bot API could not be reached
    #[error("Network error: {message}")]
    Network {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A data source answered, but not with usable data
    #[error("Data source error: {message}")]
    Source {
        /// Error message
        message: String,
        /// HTTP status, when the source answered
        status_code: Option<u16>,
    },

    /// Malformed JSON from a data source
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV reading errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart data was unusable or plotting failed
    #[error("Graph error: {message}")]
    Graph {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Rejected input, settings or series data
    #[error("Validation error: {message}")]
    Validation {
        /// Error message
        message: String,
        /// Offending field
        field: Option<String>,
    },

    /// Unknown country, province or other entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// A series held no day with usable values
    #[error("Couldn't find valid data for {0}")]
    NoValidData(String),

    /// Anything else, with a message
    #[error("{message}")]
    Generic {
        /// Error message
        message: String,
        /// Underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CovidError {
    /// Generic error
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Generic error wrapping its cause
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Configuration error wrapping its cause
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Network error wrapping its cause
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data source error
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
            status_code: None,
        }
    }

    /// Create a new data source error with the HTTP status it answered with
    pub fn data_source_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Source {
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Chart error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Chart error wrapping its cause
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Validation error naming the offending field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new not-found error for an entity name
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    /// Create a new no-valid-data error for an entity name
    pub fn no_valid_data(entity: impl Into<String>) -> Self {
        Self::NoValidData(entity.into())
    }

    /// Whether the error should be shown to the user as a plain reply
    /// rather than treated as a failure of the run
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NoValidData(_))
    }
}

// Conversions from the HTTP, TOML and plotting crates

/// Convert from reqwest::Error to CovidError
impl From<reqwest::Error> for CovidError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Could not connect to data source", err)
        } else if err.is_status() {
            let status_code = err.status().map_or(0, |s| s.as_u16());
            Self::network_with_source(format!("HTTP error: {status_code}"), err)
        } else if err.is_decode() {
            Self::network_with_source("Failed to decode response body", err)
        } else {
            Self::network_with_source("Data source request failed", err)
        }
    }
}

/// Convert from toml::de::Error to CovidError
impl From<toml::de::Error> for CovidError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("Invalid TOML", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to CovidError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for CovidError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Chart drawing failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_messages() {
        let err = CovidError::data_source_with_status("Tracker API returned 503", 503);
        assert_eq!(err.to_string(), "Data source error: Tracker API returned 503");
        assert!(matches!(err, CovidError::Source { status_code: Some(503), .. }));

        let err = CovidError::validation_field("Rolling window must span at least one day", "window_size");
        assert!(err.to_string().starts_with("Validation error: Rolling window"));

        assert_eq!(
            CovidError::no_valid_data("Nunavut").to_string(),
            "Couldn't find valid data for Nunavut"
        );
    }

    #[test]
    fn test_user_facing_errors() {
        assert!(CovidError::not_found("Gondor").is_user_facing());
        assert!(CovidError::no_valid_data("Yukon").is_user_facing());
        assert!(!CovidError::graph("No data to render").is_user_facing());
        assert!(!CovidError::network("Request timeout").is_user_facing());
    }

    #[test]
    fn test_sources_are_kept() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "owid-covid-data.csv");
        let err = CovidError::with_source("Failed to open CSV", missing);
        assert_eq!(err.to_string(), "Failed to open CSV");
        assert!(err.source().is_some());

        let err = CovidError::config_with_source(
            "Invalid tracker URL",
            io::Error::new(io::ErrorKind::InvalidInput, "bad"),
        );
        assert!(err.source().is_some());
        assert!(CovidError::config("plain").source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let covid_error: CovidError = io_error.into();

        assert!(covid_error.to_string().contains("I/O error"));
        assert!(covid_error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let covid_error: CovidError = serde_error.into();

        assert!(covid_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let covid_error: CovidError = toml_error.into();

        assert!(matches!(covid_error, CovidError::Config { .. }));
        assert!(covid_error.source().is_some());
    }

    #[test]
    fn test_error_display_formatting() {
        let error = CovidError::new("test error");
        assert_eq!(format!("{error}"), "test error");

        let config_error = CovidError::config("missing field");
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: missing field"
        );

        let not_found = CovidError::not_found("Atlantis");
        assert_eq!(format!("{not_found}"), "Not found: Atlantis");

        let no_data = CovidError::no_valid_data("Canada");
        assert_eq!(format!("{no_data}"), "Couldn't find valid data for Canada");
    }
}
