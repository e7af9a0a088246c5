//! Narrate — cloud text-to-speech playback.
//!
//! Sends text to AWS Polly or Google Cloud Text-to-Speech, buffers the
//! synthesized PCM, and plays it through a local audio output. Playback is
//! serialized on an exclusive sink; synthesis calls run freely in parallel.
//!
//! # Quick Start
//!
//! ```no_run
//! use narrate::prelude::*;
//!
//! # async fn example() -> narrate::error::Result<()> {
//! let narrator = Narrator::with_polly("ACCESS_KEY", "SECRET_KEY", None)?;
//! narrator.read_aloud("こんにちは世界").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod narrator;
pub mod playback;
pub mod prelude;
pub mod provider;
pub mod util;

pub use narrator::Narrator;
