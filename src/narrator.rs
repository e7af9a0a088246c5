//! The orchestrator tying a provider to serialized playback.

use tokio::io::AsyncRead;

use crate::config::SpeechConfig;
use crate::error::{NarrateError, Result};
use crate::playback::{AudioSink, PlaybackController};
use crate::provider::{AudioFormat, SpeechProvider, SpeechRequest};

/// Longest message `read_aloud` accepts, in Unicode scalars.
pub const MAX_MESSAGE_CHARS: usize = 1500;

/// Reads text aloud through one speech provider and one audio output.
///
/// Immutable after construction. `send_to_server` may be called from any
/// number of tasks in parallel; `play` calls serialize on the controller's
/// lock in whatever order the lock grants them.
pub struct Narrator {
    provider: Box<dyn SpeechProvider>,
    playback: PlaybackController,
    format: AudioFormat,
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl Narrator {
    /// Build a narrator around an AWS Polly provider.
    ///
    /// Fails with a configuration error when either key is empty. `None`
    /// config means all defaults.
    #[cfg(feature = "polly")]
    pub fn with_polly(
        access_key: &str,
        secret_key: &str,
        config: Option<SpeechConfig>,
    ) -> Result<Self> {
        let provider = crate::provider::polly::PollyProvider::new(
            access_key,
            secret_key,
            config.unwrap_or_default(),
        )?;
        Ok(Self::new(Box::new(provider), default_sink()))
    }

    /// Build a narrator around the Google Cloud TTS provider.
    ///
    /// The bearer token is fetched once here; a fetch failure is logged
    /// but construction still succeeds.
    #[cfg(feature = "google")]
    pub fn with_google_cloud(config: Option<SpeechConfig>) -> Result<Self> {
        let provider =
            crate::provider::google::GoogleCloudProvider::new(config.unwrap_or_default());
        Ok(Self::new(Box::new(provider), default_sink()))
    }

    /// Build a narrator from an arbitrary provider and sink.
    pub fn new(provider: Box<dyn SpeechProvider>, sink: Box<dyn AudioSink>) -> Self {
        let format = provider.output_format();
        Self {
            provider,
            playback: PlaybackController::new(sink),
            format,
        }
    }

    /// Synthesize without playing. Never touches the playback lock, so any
    /// number of calls may run in parallel.
    pub async fn send_to_server(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        self.provider.synthesize(request).await
    }

    /// Play an audio stream through the exclusive output, using this
    /// narrator's provider format.
    pub async fn play<R>(&self, audio: R) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.playback.play(audio, self.format).await
    }

    /// Synthesize a message and play it, start to finish.
    ///
    /// Messages over [`MAX_MESSAGE_CHARS`] Unicode scalars are rejected
    /// before any network call, with the measured length in the error.
    pub async fn read_aloud(&self, message: &str) -> Result<()> {
        let length = message.chars().count();
        if length > MAX_MESSAGE_CHARS {
            return Err(NarrateError::MessageTooLong(length));
        }

        let audio = self.send_to_server(&SpeechRequest::new(message)).await?;
        self.play(audio.as_slice()).await
    }
}

#[cfg(all(feature = "playback", any(feature = "polly", feature = "google")))]
fn default_sink() -> Box<dyn AudioSink> {
    Box::new(crate::playback::device::DeviceSink)
}

#[cfg(all(not(feature = "playback"), any(feature = "polly", feature = "google")))]
fn default_sink() -> Box<dyn AudioSink> {
    Box::new(crate::playback::process::ProcessSink::default())
}
