//! Exclusive, serialized audio playback.

#[cfg(feature = "playback")]
pub mod device;
pub mod process;

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::NarrateError;
use crate::provider::AudioFormat;

/// A local audio output.
///
/// `write` accepts a complete PCM buffer and returns once the output has
/// taken it, which may be before the audio has audibly finished; the
/// controller's duration timer compensates for that.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn write(&self, format: AudioFormat, pcm: &[u8]) -> Result<(), NarrateError>;
}

/// Expected playback time for a PCM buffer, with a one-second floor.
///
/// The extra second covers output latency so the tail of the audio is not
/// cut off when the sink's write returns early.
pub fn playback_duration(buffer_len: usize, format: AudioFormat) -> Duration {
    Duration::from_secs(1 + (buffer_len / format.bytes_per_second().max(1)) as u64)
}

/// Owns the exclusive audio output and serializes all playback through it.
///
/// This mutex is the only serialization point in the crate: two `play`
/// calls never overlap, while synthesis calls run unrestricted.
pub struct PlaybackController {
    sink: Mutex<Box<dyn AudioSink>>,
}

impl PlaybackController {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Play an audio stream to completion.
    ///
    /// Acquires the sink (waiting if another play is in progress), drains
    /// the stream fully into memory, then writes the buffer while a timer
    /// task waits out the computed playback duration. Returns only after
    /// both finish; the sink is released on every exit path.
    pub async fn play<R>(&self, mut audio: R, format: AudioFormat) -> Result<(), NarrateError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let sink = self.sink.lock().await;

        let mut buffer = Vec::new();
        audio.read_to_end(&mut buffer).await?;

        let wait = playback_duration(buffer.len(), format);
        debug!(bytes = buffer.len(), wait_secs = wait.as_secs(), "starting playback");

        let timer = tokio::spawn(tokio::time::sleep(wait));
        if let Err(err) = sink.write(format, &buffer).await {
            timer.abort();
            return Err(err);
        }

        timer
            .await
            .map_err(|e| NarrateError::Playback(format!("playback timer failed: {e}")))?;
        Ok(())
    }
}
