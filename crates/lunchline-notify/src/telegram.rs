//! Telegram Bot API delivery.

use std::fmt;

use async_trait::async_trait;

use crate::Notifier;
use crate::error::{Error, Result, check_response};

/// Production Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Sends messages through `sendMessage` as one bot.
///
/// The request URL embeds the bot token, so neither it nor transport errors
/// carrying it are logged.
#[derive(Clone)]
pub struct TelegramBot {
    client: reqwest::Client,
    api_base: String,
    token: String,
    parse_mode: Option<String>,
}

impl TelegramBot {
    /// Creates a bot client. Fails on a blank token.
    pub fn new(client: reqwest::Client, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::config("Telegram token is empty"));
        }
        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            token,
            parse_mode: None,
        })
    }

    /// Overrides the API host (used to point at a mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets `parse_mode` (`Markdown`, `MarkdownV2`, `HTML`); blank clears it.
    pub fn with_parse_mode(mut self, parse_mode: Option<String>) -> Self {
        self.parse_mode = parse_mode.filter(|mode| !mode.trim().is_empty());
        self
    }

    /// Whether messages are sent with a parse mode.
    pub fn parse_mode(&self) -> Option<&str> {
        self.parse_mode.as_deref()
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    /// Posts `text` to `chat_id`.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let mut form = vec![("chat_id", chat_id), ("text", text)];
        if let Some(mode) = &self.parse_mode {
            form.push(("parse_mode", mode.as_str()));
        }

        tracing::info!(chat_id = %chat_id, chars = text.chars().count(), "Sending to Telegram");
        let response = self
            .client
            .post(self.send_message_url())
            .form(&form)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        check_response("telegram", response).await
    }
}

impl fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramBot")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("parse_mode", &self.parse_mode)
            .finish()
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    fn channel(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, recipient: &str, text: &str) -> Result<()> {
        self.send_message(recipient, text).await
    }
}
