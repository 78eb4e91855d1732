//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, DEFAULT_USER_AGENT};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for geolocation lookups.
///
/// Creates a `reqwest::Client` configured with:
/// - The per-request timeout from `config.timeout_seconds`, which also bounds
///   the connect phase
/// - A crate-identifying User-Agent
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    Ok(client)
}
