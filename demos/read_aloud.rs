//! Read messages aloud through Polly, sequentially and pipelined.
//!
//! ```sh
//! AWS_ACCESS_KEY=... AWS_SECRET_KEY=... cargo run --example read_aloud
//! ```

use std::sync::Arc;

use narrate::prelude::*;

#[tokio::main]
async fn main() -> narrate::error::Result<()> {
    let config = SpeechConfig::default().with_env_credentials();
    let access_key = config.access_key.clone().unwrap_or_default();
    let secret_key = config.secret_key.clone().unwrap_or_default();
    let narrator = Arc::new(Narrator::with_polly(&access_key, &secret_key, Some(config))?);

    // Simplest form: synthesize and play in one call.
    narrator.read_aloud("こんにちは世界").await?;

    // Pipelined form: synthesize while earlier audio is still playing.
    // Playback serializes on the narrator's output lock.
    let requests = vec![
        SpeechRequest::new("こんばんわ世界").with_voice("Mizuki").with_speed(100),
        SpeechRequest::new("おはようございます世界").with_voice("Mizuki").with_speed(200),
        SpeechRequest::new("Hello World").with_voice("Joey").with_speed(100),
    ];

    let mut plays = Vec::new();
    for request in &requests {
        let audio = narrator.send_to_server(request).await?;
        let narrator = narrator.clone();
        plays.push(tokio::spawn(async move {
            narrator.play(audio.as_slice()).await
        }));
    }
    for play in plays {
        play.await.expect("play task panicked")?;
    }

    Ok(())
}
