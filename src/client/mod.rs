//! Transcription backend client.
//!
//! This module provides:
//! * [`TranscriptionClient`]: async trait implemented by every backend.
//! * [`MistralClient`]: streaming client for the Mistral transcription API.
//! * [`TranscriptionRequest`]: model, WAV payload, language and temperature.
//! * [`TranscriptionEvent`]: decoded response events; `Done` is terminal.
//! * [`SseDecoder`]: incremental server-sent-events framing.
//! * [`ClientError`]: error variants callers can classify.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use voxtral_stt::audio::{AudioBuffer, AudioMetadata};
//! use voxtral_stt::client::{MistralClient, TranscriptionClient, TranscriptionRequest};
//! use voxtral_stt::config::ProviderConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ProviderConfig::new("sk-...", None, None);
//!     let client = MistralClient::from_config(&config)?;
//!
//!     let audio = AudioBuffer::from(vec![0u8; 32_000]);
//!     let request = TranscriptionRequest::from_buffer(
//!         config.model.clone(), &audio, &AudioMetadata::default(), Some("en".into()), 0.0,
//!     )?;
//!
//!     let mut events = client.submit(request).await?;
//!     while let Some(event) = events.next().await {
//!         println!("{:?}", event?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;
pub mod request;
pub mod sse;
pub mod transcriber;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use error::ClientError;
pub use event::TranscriptionEvent;
pub use request::{TranscriptionRequest, AUDIO_CONTENT_TYPE, AUDIO_FILE_NAME};
pub use sse::{SseDecoder, SseFrame};
pub use transcriber::{decode_event_stream, EventStream, MistralClient, ModelInfo, TranscriptionClient};
