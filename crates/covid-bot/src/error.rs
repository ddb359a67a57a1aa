//! Application-wide error types using thiserror.

use covid_common::CovidError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration, data source or rendering error.
    #[error(transparent)]
    Covid(#[from] CovidError),

    /// The Bot API refused a request.
    #[error("Telegram error{}: {description}", error_code.map(|c| format!(" {c}")).unwrap_or_default())]
    Telegram {
        /// Description returned by the API.
        description: String,
        /// API error code, when returned.
        error_code: Option<i64>,
    },

    /// HTTP error talking to the Bot API. The request URL carries the bot
    /// token, so it is stripped on conversion.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
