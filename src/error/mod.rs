//! Error types for Narrate.

use thiserror::Error;

/// Primary error type for all Narrate operations.
#[derive(Error, Debug)]
pub enum NarrateError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Message is {0} characters long. Please pass a message of 1500 characters or fewer.")]
    MessageTooLong(usize),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl NarrateError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a provider error with the provider's name attached.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether retrying the same call could plausibly succeed.
    ///
    /// Narrate never retries on its own; this is advisory for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Api { status: 500..=599, .. }
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NarrateError>;
