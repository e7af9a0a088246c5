//! Google Cloud Text-to-Speech provider.

use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SpeechConfig;
use crate::error::NarrateError;
use crate::util::timeout::with_timeout;

use super::http::{bearer_headers, shared_client, status_to_error, trim_trailing_slash};
use super::ssml;
use super::{AudioFormat, SpeechProvider, SpeechRequest};

const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";
const SYNTHESIZE_PATH: &str = "/v1beta1/text:synthesize";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// LINEAR16 at 16 kHz, as requested in the audio config of every call.
const OUTPUT_FORMAT: AudioFormat = AudioFormat {
    sample_rate_hz: 16_000,
    channels: 1,
    bytes_per_sample: 2,
};

#[derive(Debug, Serialize)]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    ssml: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    pub language_code: String,
    pub name: String,
    pub ssml_gender: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
    sample_rate_hertz: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Map a Polly-style voice name to Google's voice selection triple.
///
/// Unrecognized names fall back to an English WaveNet voice.
pub fn voice_selection(name: &str) -> VoiceSelection {
    match name {
        "Mizuki" => VoiceSelection {
            language_code: "ja-JP".to_string(),
            name: "ja-JP-Wavenet-A".to_string(),
            ssml_gender: "FEMALE".to_string(),
        },
        _ => VoiceSelection {
            language_code: "en-US".to_string(),
            name: "en-US-Wavenet-C".to_string(),
            ssml_gender: "FEMALE".to_string(),
        },
    }
}

/// Speech provider backed by the Google Cloud TTS REST API.
///
/// The bearer token is obtained once at construction and never refreshed;
/// an expired token surfaces as an authentication error on a later call.
pub struct GoogleCloudProvider {
    config: SpeechConfig,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl GoogleCloudProvider {
    /// Build a provider, fetching an access token from `gcloud`.
    ///
    /// A failed token fetch is logged but does not abort construction;
    /// synthesis calls will then fail against the remote API.
    pub fn new(config: SpeechConfig) -> Self {
        let token = fetch_access_token().unwrap_or_else(|e| {
            warn!(error = %e, "could not obtain an access token; synthesis will fail");
            String::new()
        });
        Self::with_token(config, token)
    }

    /// Build a provider around an already-obtained bearer token.
    pub fn with_token(config: SpeechConfig, token: impl Into<String>) -> Self {
        Self {
            config,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request_body(&self, request: &SpeechRequest) -> SynthesizeRequest {
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

        SynthesizeRequest {
            input: SynthesisInput {
                ssml: ssml::prosody_document(&request.message, speed),
            },
            voice: voice_selection(voice),
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16".to_string(),
                sample_rate_hertz: OUTPUT_FORMAT.sample_rate_hz,
            },
        }
    }
}

#[async_trait]
impl SpeechProvider for GoogleCloudProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn output_format(&self) -> AudioFormat {
        OUTPUT_FORMAT
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, NarrateError> {
        let body = self.build_request_body(request);
        let url = format!(
            "{}{SYNTHESIZE_PATH}",
            trim_trailing_slash(&self.base_url)
        );
        debug!(voice = %body.voice.name, chars = request.message.chars().count(), "synthesizing with Google Cloud TTS");

        with_timeout(self.timeout, async {
            let response = shared_client()
                .post(url)
                .headers(bearer_headers(&self.token))
                .json(&body)
                .send()
                .await?;

            let status = response.status().as_u16();
            if status != 200 {
                let body = response.text().await.unwrap_or_default();
                return Err(status_to_error(status, &body));
            }

            let parsed: SynthesizeResponse = serde_json::from_str(&response.text().await?)?;
            BASE64_STANDARD
                .decode(parsed.audio_content.as_bytes())
                .map_err(|e| NarrateError::Decode(format!("invalid base64 audio content: {e}")))
        })
        .await
    }
}

/// Ask `gcloud` for an application-default access token (first line of
/// stdout).
fn fetch_access_token() -> Result<String, NarrateError> {
    let output = std::process::Command::new("gcloud")
        .args(["auth", "application-default", "print-access-token"])
        .output()?;

    if !output.status.success() {
        return Err(NarrateError::Authentication(format!(
            "gcloud exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let token = stdout.lines().next().unwrap_or("").trim().to_string();
    if token.is_empty() {
        return Err(NarrateError::Authentication(
            "gcloud printed an empty access token".to_string(),
        ));
    }
    Ok(token)
}
