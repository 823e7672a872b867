use thiserror::Error;

use crate::client::FetchError;

/// A recoverable failure that ends the current cycle early.
///
/// Every variant funnels into the same per-cycle error path: logged at error
/// level, then forwarded to the chat unless it repeats the previously
/// notified text. None of them terminate the process.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The review API could not be reached or answered with a non-200 status.
    #[error("API request failed: {0}")]
    Api(#[from] FetchError),

    /// The response lacks a key the API documentation requires.
    #[error("API response malformed: {0}")]
    MalformedResponse(String),

    /// A value in the response has the wrong JSON type.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A homework record lacks a required field, or the field is empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A homework status outside the known verdict set.
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}
