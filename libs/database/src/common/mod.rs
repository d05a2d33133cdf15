//! Helpers shared by every store connector

pub mod retry;

pub use retry::{RetryConfig, retry, retry_with_backoff};
