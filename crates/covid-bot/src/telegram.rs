//! Telegram Bot API client for posting replies to a chat
//!
//! Text goes out through `sendMessage` with HTML parse mode, charts
//! through `sendPhoto` as a multipart PNG upload.

use crate::error::{BotError, BotResult};
use covid_commands::Reply;
use covid_config::TelegramConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Envelope of every Bot API response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse {
    /// Whether the request succeeded
    pub ok: bool,
    /// Human-readable reason for a refusal
    #[serde(default)]
    pub description: Option<String>,
    /// HTTP-like error code of a refusal
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl ApiResponse {
    /// Turn a refused request into an error
    pub fn into_result(self) -> BotResult<()> {
        if self.ok {
            return Ok(());
        }
        Err(BotError::Telegram {
            description: self
                .description
                .unwrap_or_else(|| "Request was not successful".to_string()),
            error_code: self.error_code,
        })
    }
}

/// Body of a `sendMessage` request
#[derive(Debug, Clone, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Telegram Bot API client bound to one chat
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a new client with the given configuration
    pub fn new(config: &TelegramConfig, timeout_secs: u64) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    /// URL of a Bot API method
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn check(response: Response) -> BotResult<()> {
        let status = response.status();
        let body = response.text().await?;
        let parsed: ApiResponse = serde_json::from_str(&body).map_err(|_| BotError::Telegram {
            description: format!("Unexpected response ({status})"),
            error_code: Some(i64::from(status.as_u16())),
        })?;

        if let Err(e) = parsed.clone().into_result() {
            error!("Bot API refused the request: {}", e);
            return Err(e);
        }
        debug!("Bot API accepted the request: {}", status);
        Ok(())
    }

    /// Post an HTML-formatted message
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn send_message(&self, text: &str) -> BotResult<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        info!("Posted message");
        Ok(())
    }

    /// Upload a PNG chart
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn send_photo(&self, path: &Path) -> BotResult<()> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "chart.png".to_string(), |n| n.to_string_lossy().into_owned());
        let photo = Part::bytes(bytes).file_name(file_name).mime_str("image/png")?;
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .part("photo", photo);

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await?;
        info!("Posted chart");
        Ok(())
    }

    /// Post whatever a command answered with
    pub async fn send_reply(&self, reply: &Reply) -> BotResult<()> {
        match reply {
            Reply::Text(text) => self.send_message(text).await,
            Reply::Photo(path) => self.send_photo(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> TelegramConfig {
        TelegramConfig {
            token: "123:abc".to_string(),
            chat_id: "-1001".to_string(),
            api_url: api_url.to_string(),
        }
    }

    #[test]
    fn test_method_url() {
        let client = TelegramClient::new(&config("https://api.telegram.org/"), 5).unwrap();
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[tokio::test]
    async fn test_transport_errors_hide_token() {
        // Nothing listens on the discard port, so the request fails to connect
        let client = TelegramClient::new(&config("http://127.0.0.1:9"), 5).unwrap();
        let err = client.send_message("hello").await.unwrap_err();

        assert!(matches!(err, BotError::Http(_)));
        assert!(!err.to_string().contains("123:abc"));
        assert!(!format!("{err:?}").contains("123:abc"));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(&config("https://api.telegram.org"), 5).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("123:abc"));
        assert!(debug.contains("-1001"));
    }

    #[test]
    fn test_api_response_results() {
        let ok: ApiResponse = serde_json::from_str(r#"{"ok":true,"result":{"message_id":1}}"#).unwrap();
        assert!(ok.into_result().is_ok());

        let refused: ApiResponse =
            serde_json::from_str(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#)
                .unwrap();
        match refused.into_result() {
            Err(BotError::Telegram {
                description,
                error_code,
            }) => {
                assert_eq!(description, "Unauthorized");
                assert_eq!(error_code, Some(401));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_message_body() {
        let body = SendMessage {
            chat_id: "-1001",
            text: "<b>Hi</b>",
            parse_mode: "HTML",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["parse_mode"], "HTML");
        assert_eq!(json["text"], "<b>Hi</b>");
    }

    #[tokio::test]
    async fn test_missing_photo_is_io_error() {
        let client = TelegramClient::new(&config("http://127.0.0.1:9"), 1).unwrap();
        let err = client
            .send_photo(Path::new("/nonexistent/chart.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::Io(_)));
    }
}
