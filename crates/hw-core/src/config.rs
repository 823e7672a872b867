use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Endpoint queried for homework status updates unless overridden.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Environment variable holding the review API token.
pub const REVIEW_API_TOKEN_VAR: &str = "REVIEW_API_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the destination chat identifier.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Configuration for a homework watch loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Review API endpoint queried each cycle.
    pub endpoint: String,
    /// Fixed delay between poll cycles (default: 600s).
    pub poll_interval: Duration,
    /// HTTP request timeout for status fetches.
    pub request_timeout: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: Duration::from_secs(600),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl WatchConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval = Duration::from_secs(secs);
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout = Duration::from_secs(secs);
        self
    }
}

/// The three values every downstream call assumes are present.
///
/// All of them must be non-empty before the loop may start; the caller is
/// expected to treat any entry in [`Credentials::missing`] as fatal.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// OAuth token for the review API.
    pub api_token: String,
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Destination chat identifier.
    pub chat_id: String,
}

impl Credentials {
    /// Read all three credentials from the environment. Absent variables
    /// become empty strings and show up in [`Credentials::missing`].
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var(REVIEW_API_TOKEN_VAR).unwrap_or_default(),
            bot_token: std::env::var(TELEGRAM_BOT_TOKEN_VAR).unwrap_or_default(),
            chat_id: std::env::var(TELEGRAM_CHAT_ID_VAR).unwrap_or_default(),
        }
    }

    /// Names of the credential variables that are absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_token.is_empty() {
            missing.push(REVIEW_API_TOKEN_VAR);
        }
        if self.bot_token.is_empty() {
            missing.push(TELEGRAM_BOT_TOKEN_VAR);
        }
        if self.chat_id.is_empty() {
            missing.push(TELEGRAM_CHAT_ID_VAR);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(api: &str, bot: &str, chat: &str) -> Credentials {
        Credentials {
            api_token: api.to_string(),
            bot_token: bot.to_string(),
            chat_id: chat.to_string(),
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = WatchConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_interval, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn builders_override_fields() {
        let config = WatchConfig::default()
            .with_endpoint("https://reviews.example.com/statuses/")
            .with_poll_interval(30)
            .with_request_timeout(2);
        assert_eq!(config.endpoint, "https://reviews.example.com/statuses/");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn complete_credentials_have_nothing_missing() {
        let c = creds("api", "bot", "chat");
        assert!(c.missing().is_empty());
        assert!(c.is_complete());
    }

    #[test]
    fn each_empty_credential_is_named() {
        assert_eq!(
            creds("", "bot", "chat").missing(),
            vec![REVIEW_API_TOKEN_VAR]
        );
        assert_eq!(
            creds("api", "", "chat").missing(),
            vec![TELEGRAM_BOT_TOKEN_VAR]
        );
        assert_eq!(
            creds("api", "bot", "").missing(),
            vec![TELEGRAM_CHAT_ID_VAR]
        );
    }

    #[test]
    fn all_empty_credentials_are_named_in_order() {
        let c = creds("", "", "");
        assert_eq!(
            c.missing(),
            vec![
                REVIEW_API_TOKEN_VAR,
                TELEGRAM_BOT_TOKEN_VAR,
                TELEGRAM_CHAT_ID_VAR
            ]
        );
        assert!(!c.is_complete());
    }

    #[test]
    fn partial_subsets_report_every_missing_name() {
        assert_eq!(
            creds("", "", "chat").missing(),
            vec![REVIEW_API_TOKEN_VAR, TELEGRAM_BOT_TOKEN_VAR]
        );
        assert_eq!(
            creds("", "bot", "").missing(),
            vec![REVIEW_API_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR]
        );
        assert_eq!(
            creds("api", "", "").missing(),
            vec![TELEGRAM_BOT_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR]
        );
    }
}
