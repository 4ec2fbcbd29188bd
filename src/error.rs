//! Error types for config server retrieval and merging.

use thiserror::Error;

/// Errors surfaced by a bootstrap call.
///
/// An unset server URL is not an error; see [`crate::bootstrap::Outcome::NotConfigured`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Transport failure or error status, after retries were exhausted.
    #[error("Failed to fetch config from {url}: {cause}")]
    Fetch { url: String, cause: String },

    #[error("Failed to decode config server response: {0}")]
    Decode(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl BootstrapError {
    pub fn fetch(url: &str, cause: impl ToString) -> Self {
        BootstrapError::Fetch {
            url: url.to_string(),
            cause: cause.to_string(),
        }
    }
}

impl From<config::ConfigError> for BootstrapError {
    fn from(err: config::ConfigError) -> Self {
        BootstrapError::Settings(err.to_string())
    }
}

impl From<serde_json::Error> for BootstrapError {
    fn from(err: serde_json::Error) -> Self {
        BootstrapError::Decode(err.to_string())
    }
}
