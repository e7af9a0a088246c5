//! Speech provider trait and implementations.

pub mod http;
pub mod ssml;

#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "polly")]
pub mod polly;

use async_trait::async_trait;

use crate::error::NarrateError;

/// PCM shape of a provider's synthesized output.
///
/// Each provider variant supplies its own triple; nothing in the crate
/// assumes a particular rate or width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate_hz: u32,
    pub channels: u16,
    pub bytes_per_sample: u16,
}

impl AudioFormat {
    /// Bytes of PCM per second of audio.
    pub fn bytes_per_second(&self) -> usize {
        self.sample_rate_hz as usize * self.channels as usize * self.bytes_per_sample as usize
    }
}

/// A single synthesis request.
///
/// An empty `voice` and a zero `speed` mean "use the provider's configured
/// default". `speed` is a percentage multiplier (100 = normal rate).
#[derive(Debug, Clone, Default)]
pub struct SpeechRequest {
    pub message: String,
    pub voice: String,
    pub speed: u32,
}

impl SpeechRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }
}

/// Core trait implemented by all speech providers.
///
/// Implementations are read-only after construction and safe to call from
/// any number of tasks concurrently; synthesis carries no ordering
/// guarantee.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Provider name (e.g., "polly", "google").
    fn provider_name(&self) -> &str;

    /// PCM shape this provider's audio conforms to.
    fn output_format(&self) -> AudioFormat;

    /// Synthesize speech, returning the complete audio byte buffer.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, NarrateError>;
}
