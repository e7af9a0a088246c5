//! AWS Polly speech provider.

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_polly::config::{BehaviorVersion, Region};
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{OutputFormat, TextType, VoiceId};
use tracing::debug;

use crate::config::SpeechConfig;
use crate::error::NarrateError;

use super::ssml;
use super::{AudioFormat, SpeechProvider, SpeechRequest};

/// Polly emits 16 kHz mono 16-bit linear PCM for the "pcm" output format.
const OUTPUT_FORMAT: AudioFormat = AudioFormat {
    sample_rate_hz: 16_000,
    channels: 1,
    bytes_per_sample: 2,
};

/// Speech provider backed by the AWS Polly `SynthesizeSpeech` operation.
#[derive(Debug)]
pub struct PollyProvider {
    client: aws_sdk_polly::Client,
    config: SpeechConfig,
}

impl PollyProvider {
    /// Build a provider from static signing credentials.
    ///
    /// Fails with a configuration error before any client is built when
    /// either key is empty.
    pub fn new(
        access_key: &str,
        secret_key: &str,
        config: SpeechConfig,
    ) -> Result<Self, NarrateError> {
        if access_key.is_empty() || secret_key.is_empty() {
            return Err(NarrateError::Configuration(
                "Access key or Secret key are invalid".to_string(),
            ));
        }

        let credentials = Credentials::from_keys(access_key, secret_key, None);
        let sdk_config = aws_sdk_polly::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .build();

        Ok(Self {
            client: aws_sdk_polly::Client::from_conf(sdk_config),
            config,
        })
    }
}

#[async_trait]
impl SpeechProvider for PollyProvider {
    fn provider_name(&self) -> &str {
        "polly"
    }

    fn output_format(&self) -> AudioFormat {
        OUTPUT_FORMAT
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, NarrateError> {
        let speed = if request.speed == 0 {
            self.config.speed
        } else {
            request.speed
        };
        let voice = if request.voice.is_empty() {
            self.config.voice.as_str()
        } else {
            request.voice.as_str()
        };

        let text = ssml::prosody_document(&request.message, speed);
        debug!(voice, speed, chars = request.message.chars().count(), "synthesizing with Polly");

        let response = self
            .client
            .synthesize_speech()
            .output_format(OutputFormat::from(self.config.format.as_str()))
            .text(text)
            .text_type(TextType::from(self.config.text_type.as_str()))
            .voice_id(VoiceId::from(voice))
            .send()
            .await
            .map_err(|e| {
                NarrateError::provider("polly", format!("{}", DisplayErrorContext(&e)))
            })?;

        let audio = response.audio_stream.collect().await.map_err(|e| {
            NarrateError::provider("polly", format!("failed to read audio stream: {e}"))
        })?;

        Ok(audio.into_bytes().to_vec())
    }
}
