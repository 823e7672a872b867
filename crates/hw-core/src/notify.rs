//! Chat notification sink.
//!
//! One sendMessage POST per notification, fire-and-forget from the watch
//! loop's perspective: delivery failures are surfaced to the caller as
//! [`NotifyError`] and the loop logs and discards them.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Telegram Bot API host. Overridable per notifier for tests.
pub const TELEGRAM_API_HOST: &str = "https://api.telegram.org";

/// Failure delivering a notification. Logged at the watch loop boundary,
/// never escalated, never retried within the cycle.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram API responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request to Telegram failed: {reason}")]
    Transport { reason: String },
}

/// Trait for the chat notification sink.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Attempt a single delivery of `text` to the configured destination.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Telegram notifier bound to one bot token and one destination chat.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_host: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            api_host: TELEGRAM_API_HOST.to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Point the notifier at a different Bot API host.
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_host, self.token)
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        debug!("Sending chat notification");

        let response = self
            .client
            .post(self.send_message_url())
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| NotifyError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(text, "Chat notification delivered");
        Ok(())
    }
}
