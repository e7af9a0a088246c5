//! Speech configuration (TOML file + environment overlay).

use std::path::Path;

use serde::Deserialize;

use crate::error::{NarrateError, Result};

/// Configuration shared by both providers.
///
/// Unset fields fall back to the documented defaults; `voice` and `speed`
/// apply only when a [`SpeechRequest`](crate::provider::SpeechRequest)
/// leaves its own fields unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// AWS region for the Polly variant.
    pub region: String,
    /// Provider output format tag ("pcm" for Polly; Google is fixed to LINEAR16).
    pub format: String,
    /// Default voice name substituted for requests with an empty voice.
    pub voice: String,
    /// Text type sent to Polly. Always "ssml" in practice.
    #[serde(alias = "type")]
    pub text_type: String,
    /// Default speaking rate in percent (100 = normal).
    pub speed: u32,
    /// AWS access key, if supplied through the config file.
    pub access_key: Option<String>,
    /// AWS secret key, if supplied through the config file.
    pub secret_key: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            format: "pcm".to_string(),
            voice: "Mizuki".to_string(),
            text_type: "ssml".to_string(),
            speed: 100,
            access_key: None,
            secret_key: None,
        }
    }
}

impl SpeechConfig {
    /// Parse a config from a TOML string.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| NarrateError::Configuration(e.to_string()))
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Overlay AWS credentials from the environment (`AWS_ACCESS_KEY`,
    /// `AWS_SECRET_KEY`), loading a `.env` file first if one exists.
    /// Values already present in the config win.
    pub fn with_env_credentials(mut self) -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        if self.access_key.is_none() {
            self.access_key = std::env::var("AWS_ACCESS_KEY").ok();
        }
        if self.secret_key.is_none() {
            self.secret_key = std::env::var("AWS_SECRET_KEY").ok();
        }
        self
    }
}
