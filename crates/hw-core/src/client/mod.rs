mod http;

pub use http::HttpReviewApi;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failure fetching status updates.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("endpoint {url} unavailable, response code {status}")]
    Status { url: String, status: u16 },
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("timeout fetching {url}")]
    Timeout { url: String },
    #[error("undecodable response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl FetchError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trait for querying the review API for homework updates.
///
/// Implementations issue a single timestamped GET and return the payload
/// as parsed JSON, unvalidated. The trait is object-safe and Send + Sync
/// so the watch loop can hold it behind an Arc.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Fetch homework updates submitted after `from` (seconds since epoch).
    async fn fetch_updates(&self, from: i64) -> Result<Value, FetchError>;
}
