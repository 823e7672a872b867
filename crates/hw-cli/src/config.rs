//! TOML configuration file schema and parsing.
//!
//! Operational settings only; the three credentials are read from the
//! environment and never belong in the file.
//!
//! Example config file:
//!
//! ```toml
//! endpoint = "https://practicum.yandex.ru/api/user_api/homework_statuses/"
//! poll_interval_secs = 600
//! request_timeout_secs = 10
//! log_format = "pretty"
//! ```

use std::path::Path;

use serde::Deserialize;

use hw_core::WatchConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: default_log_format(),
        }
    }
}

fn default_endpoint() -> String {
    hw_core::config::DEFAULT_ENDPOINT.to_string()
}

fn default_poll_interval_secs() -> u64 {
    600
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "pretty".into()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid endpoint URL: {} ({})", self.endpoint, e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "Endpoint URL must use http or https: {}",
                self.endpoint
            ));
        }

        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be non-zero".into());
        }

        match self.log_format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(format!(
                    "Invalid log_format '{}': must be 'pretty' or 'json'",
                    other
                ));
            }
        }

        Ok(())
    }

    pub fn to_watch_config(&self) -> WatchConfig {
        WatchConfig::default()
            .with_endpoint(&self.endpoint)
            .with_poll_interval(self.poll_interval_secs)
            .with_request_timeout(self.request_timeout_secs)
    }
}
