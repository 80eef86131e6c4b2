//! Alert delivery.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use backwatch_core::config::TelegramSettings;
use log::{debug, info};

use crate::renderer::TerminalRenderer;

const TELEGRAM_API: &str = "https://api.telegram.org";

/// A destination for the rendered alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &'static str;

    /// Deliver the alert text.
    async fn send(&self, message: &str) -> Result<()>;
}

/// Sends the alert through a Telegram bot.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_key: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier for the configured bot and chat.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(settings: &TelegramSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            bot_key: settings.bot_key.clone(),
            chat_id: settings.chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{TELEGRAM_API}/bot{}/sendMessage", self.bot_key)
    }

    fn form<'a>(&'a self, message: &'a str) -> [(&'static str, &'a str); 4] {
        [
            ("chat_id", self.chat_id.as_str()),
            ("disable_web_page_preview", "1"),
            ("parse_mode", "Markdown"),
            ("text", message),
        ]
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<()> {
        debug!("sending {} byte alert to chat {}", message.len(), self.chat_id);

        self.client
            .post(self.send_message_url())
            .form(&self.form(message))
            .send()
            .await
            .context("Failed to send Telegram alert")?
            .error_for_status()
            .context("Telegram rejected the alert")?;

        info!("alert delivered to Telegram chat {}", self.chat_id);
        Ok(())
    }
}

/// Prints the alert to the terminal instead of sending it.
pub struct TerminalNotifier {
    renderer: TerminalRenderer,
}

impl TerminalNotifier {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    fn name(&self) -> &'static str {
        "terminal"
    }

    async fn send(&self, message: &str) -> Result<()> {
        self.renderer.render(message);
        Ok(())
    }
}
