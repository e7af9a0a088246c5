//! External player process sink.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::NarrateError;
use crate::provider::AudioFormat;

use super::AudioSink;

/// Feeds raw PCM to an external player over its stdin pipe.
///
/// The default program is SoX's `play`; any program that reads signed
/// little-endian PCM on stdin with the same flag syntax works.
pub struct ProcessSink {
    program: String,
}

impl Default for ProcessSink {
    fn default() -> Self {
        Self::new("play")
    }
}

impl ProcessSink {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn raw_pcm_args(format: AudioFormat) -> Vec<String> {
        vec![
            "-q".to_string(),
            "-t".to_string(),
            "raw".to_string(),
            "-r".to_string(),
            format.sample_rate_hz.to_string(),
            "-e".to_string(),
            "signed".to_string(),
            "-b".to_string(),
            (format.bytes_per_sample as u32 * 8).to_string(),
            "-c".to_string(),
            format.channels.to_string(),
            "-".to_string(),
        ]
    }
}

#[async_trait]
impl AudioSink for ProcessSink {
    async fn write(&self, format: AudioFormat, pcm: &[u8]) -> Result<(), NarrateError> {
        debug!(program = %self.program, bytes = pcm.len(), "piping audio to player process");

        let mut child = Command::new(&self.program)
            .args(Self::raw_pcm_args(format))
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                NarrateError::Playback(format!("failed to spawn '{}': {e}", self.program))
            })?;

        {
            // Take stdin so the pipe closes before waiting on the child.
            let mut stdin = child.stdin.take().ok_or_else(|| {
                NarrateError::Playback("player process has no stdin pipe".to_string())
            })?;
            stdin.write_all(pcm).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(NarrateError::Playback(format!(
                "'{}' exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}
