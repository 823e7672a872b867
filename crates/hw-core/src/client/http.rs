use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{FetchError, ReviewApi};
use crate::config::WatchConfig;

/// HTTP review API client with a bounded request timeout.
///
/// One GET per call, no retries: spacing between attempts is the watch
/// loop's fixed poll interval.
#[derive(Debug, Clone)]
pub struct HttpReviewApi {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpReviewApi {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self::with_client(Self::build_client(timeout), endpoint, token)
    }

    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &WatchConfig, token: impl Into<String>) -> Self {
        Self::new(&config.endpoint, token, config.request_timeout)
    }

    pub fn build_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client")
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewApi for HttpReviewApi {
    async fn fetch_updates(&self, from: i64) -> Result<Value, FetchError> {
        debug!(endpoint = %self.endpoint, from_date = from, "Requesting status updates");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(endpoint = %self.endpoint, "Status fetch timed out");
                    FetchError::Timeout {
                        url: self.endpoint.clone(),
                    }
                } else {
                    warn!(endpoint = %self.endpoint, error = %e, "Status fetch network error");
                    FetchError::Network {
                        url: self.endpoint.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "Status fetch returned error status");
            return Err(FetchError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        debug!(endpoint = %self.endpoint, "Status updates received");
        response.json::<Value>().await.map_err(|e| FetchError::Decode {
            url: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }
}
