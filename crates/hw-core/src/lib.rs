#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod review;
pub mod watcher;

pub use client::{FetchError, HttpReviewApi, ReviewApi};
pub use config::{Credentials, WatchConfig};
pub use error::WatchError;
pub use notify::{Notify, NotifyError, TelegramNotifier};
pub use review::{describe, extract_homeworks};
pub use watcher::Watcher;
