//! Convenience re-exports.

pub use crate::config::SpeechConfig;
pub use crate::error::{NarrateError, Result};
pub use crate::narrator::{Narrator, MAX_MESSAGE_CHARS};
pub use crate::playback::{AudioSink, PlaybackController};
pub use crate::provider::{AudioFormat, SpeechProvider, SpeechRequest};
