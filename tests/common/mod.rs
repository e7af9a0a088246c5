//! Shared fakes for orchestrator and playback tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use narrate::error::NarrateError;
use narrate::playback::AudioSink;
use narrate::provider::{AudioFormat, SpeechProvider, SpeechRequest};
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const PCM_16K_MONO: AudioFormat = AudioFormat {
    sample_rate_hz: 16_000,
    channels: 1,
    bytes_per_sample: 2,
};

/// Provider returning a fixed payload after a simulated network delay.
pub struct FakeProvider {
    pub payload: Vec<u8>,
    pub delay: Duration,
    pub calls: Arc<AtomicUsize>,
    pub fail_with: Option<String>,
}

impl FakeProvider {
    pub fn returning(payload: Vec<u8>) -> Self {
        Self {
            payload,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            fail_with: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::returning(Vec::new())
        }
    }
}

#[async_trait]
impl SpeechProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    fn output_format(&self) -> AudioFormat {
        PCM_16K_MONO
    }

    async fn synthesize(&self, _request: &SpeechRequest) -> Result<Vec<u8>, NarrateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(ref message) = self.fail_with {
            return Err(NarrateError::provider("fake", message.clone()));
        }
        Ok(self.payload.clone())
    }
}

/// One recorded sink write: byte count plus enter/exit instants.
#[derive(Debug, Clone)]
pub struct WriteRecord {
    pub bytes: usize,
    pub entered: Instant,
    pub exited: Instant,
}

/// Sink recording every write interval, optionally holding the write open
/// for a while to make overlap detectable.
pub struct RecordingSink {
    pub writes: Arc<Mutex<Vec<WriteRecord>>>,
    pub write_delay: Duration,
    pub fail_with: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            write_delay: Duration::ZERO,
            fail_with: None,
        }
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }
}

#[async_trait]
impl AudioSink for RecordingSink {
    async fn write(&self, _format: AudioFormat, pcm: &[u8]) -> Result<(), NarrateError> {
        let entered = Instant::now();
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
        if let Some(ref message) = self.fail_with {
            return Err(NarrateError::Playback(message.clone()));
        }
        self.writes.lock().await.push(WriteRecord {
            bytes: pcm.len(),
            entered,
            exited: Instant::now(),
        });
        Ok(())
    }
}
