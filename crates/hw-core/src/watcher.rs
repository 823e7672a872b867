//! The polling state machine: fetch -> validate -> interpret -> notify -> sleep.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::client::ReviewApi;
use crate::config::WatchConfig;
use crate::error::WatchError;
use crate::notify::Notify;
use crate::review::{describe, extract_homeworks};

/// Watches the review API for homework status changes and forwards them to
/// the chat. Owns the poll cursor and the last-notified-error value; both
/// live only as long as the process.
pub struct Watcher {
    config: WatchConfig,
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn Notify>,
    cursor: i64,
    last_notified_error: Option<String>,
}

impl Watcher {
    /// Create a watcher with the cursor initialized to the current time, so
    /// only updates submitted after startup are reported.
    pub fn new(config: WatchConfig, api: Arc<dyn ReviewApi>, notifier: Arc<dyn Notify>) -> Self {
        Self {
            config,
            api,
            notifier,
            cursor: Utc::now().timestamp(),
            last_notified_error: None,
        }
    }

    /// Override the initial cursor.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run cycles forever with the fixed poll interval between them. The
    /// only exit is process termination; restart-on-crash is left to
    /// external supervision.
    pub async fn run(mut self) {
        info!(endpoint = %self.config.endpoint, "Watcher started");

        loop {
            self.poll_once().await;

            let secs = self.config.poll_interval.as_secs();
            info!(secs, "Next poll scheduled");
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Run exactly one poll cycle.
    ///
    /// On failure the cursor is left untouched and the diagnostic is
    /// forwarded to the chat, unless its text repeats the previously
    /// notified one.
    pub async fn poll_once(&mut self) {
        if let Err(e) = self.cycle().await {
            let message = format!("Сбой в работе программы: {e}");
            error!("{message}");

            if self.last_notified_error.as_deref() != Some(message.as_str()) {
                self.notify(&message).await;
                self.last_notified_error = Some(message);
            }
        }
    }

    async fn cycle(&mut self) -> Result<(), WatchError> {
        let raw = self.api.fetch_updates(self.cursor).await?;
        let homeworks = extract_homeworks(&raw)?;

        // Only the first (most recent) record is ever inspected per cycle.
        match homeworks.first() {
            Some(homework) => {
                let message = describe(homework)?;
                self.notify(&message).await;
                info!("Homework status updated");
            }
            None => debug!("No new statuses"),
        }

        self.cursor = raw
            .get("current_date")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| Utc::now().timestamp());

        Ok(())
    }

    /// Fire-and-forget send: delivery failures are logged, never propagated.
    async fn notify(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            error!(error = %e, "Failed to deliver chat notification");
        }
    }
}
