//! Core bot logic: run one command, print the reply, optionally post it.

use crate::error::BotResult;
use crate::telegram::TelegramClient;
use covid_commands::{Command, CommandContext, Reply};
use covid_config::Config;
use tracing::info;

/// Main bot structure.
#[derive(Debug)]
pub struct CovidBot {
    config: Config,
    context: CommandContext,
}

impl CovidBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> BotResult<Self> {
        let context = CommandContext::from_config(&config)?;
        Ok(Self { config, context })
    }

    /// Loaded configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one command.
    pub async fn run(&self, command: &Command) -> BotResult<Reply> {
        info!("Running {}", command.name());
        Ok(command.execute(&self.context).await?)
    }

    /// Posts a reply to the configured chat.
    pub async fn post(&self, reply: &Reply) -> BotResult<()> {
        self.config.validate_telegram()?;
        let client = TelegramClient::new(&self.config.telegram, self.config.sources.timeout_seconds)?;
        client.send_reply(reply).await
    }
}

/// How a reply is shown on stdout.
pub fn reply_output(reply: &Reply) -> String {
    match reply {
        Reply::Text(text) => text.clone(),
        Reply::Photo(path) => format!("Chart written to {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_reply_output() {
        assert_eq!(reply_output(&Reply::Text("hi".into())), "hi");
        assert_eq!(
            reply_output(&Reply::Photo(PathBuf::from("out/state_cases.png"))),
            "Chart written to out/state_cases.png"
        );
    }

    #[tokio::test]
    async fn test_post_requires_telegram_settings() {
        let bot = CovidBot::new(Config::default()).unwrap();
        let err = bot.post(&Reply::Text("hi".into())).await.unwrap_err();
        assert!(err.to_string().contains("Telegram token"));
    }
}
