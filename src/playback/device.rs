//! Local audio device sink (rodio).

use async_trait::async_trait;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStreamBuilder, Sink};

use crate::error::NarrateError;
use crate::provider::AudioFormat;

use super::AudioSink;

/// Plays PCM through the default output device.
///
/// The device is opened per write and the call returns once rodio has
/// drained the submitted samples. rodio is not async, so the work runs on
/// a dedicated thread with the result handed back over a oneshot channel.
pub struct DeviceSink;

#[async_trait]
impl AudioSink for DeviceSink {
    async fn write(&self, format: AudioFormat, pcm: &[u8]) -> Result<(), NarrateError> {
        let samples = decode_samples(format, pcm)?;
        let channels = format.channels;
        let sample_rate = format.sample_rate_hz;

        let (tx, rx) = tokio::sync::oneshot::channel();
        std::thread::spawn(move || {
            let result = (|| -> Result<(), NarrateError> {
                let stream = OutputStreamBuilder::open_default_stream().map_err(|e| {
                    NarrateError::Playback(format!("failed to open output device: {e}"))
                })?;
                let sink = Sink::connect_new(stream.mixer());
                sink.append(SamplesBuffer::new(channels, sample_rate, samples));
                sink.sleep_until_end();
                Ok(())
            })();
            let _ = tx.send(result);
        });

        rx.await
            .map_err(|e| NarrateError::Playback(format!("playback thread terminated: {e}")))?
    }
}

/// Interpret the buffer as little-endian signed 16-bit samples.
fn decode_samples(format: AudioFormat, pcm: &[u8]) -> Result<Vec<f32>, NarrateError> {
    if format.bytes_per_sample != 2 {
        return Err(NarrateError::Playback(format!(
            "unsupported sample width: {} bytes",
            format.bytes_per_sample
        )));
    }

    Ok(pcm
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / i16::MAX as f32)
        .collect())
}
