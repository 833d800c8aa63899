//! STT (Speech-to-Text) provider module.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 SpeechToText (trait)                       │
//! │                                                           │
//! │  AudioStream ──▶ AudioBuffer ──▶ frame_wav ──▶ Request    │
//! │                                                  │        │
//! │                         TranscriptionClient::submit       │
//! │                                                  │        │
//! │                                                  ▼        │
//! │                 consume_events (Streaming → Success/Error)│
//! │                                                  │        │
//! │                                                  ▼        │
//! │                                   TranscriptionResult     │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use futures_util::stream;
//! use voxtral_stt::audio::AudioMetadata;
//! use voxtral_stt::config::{ConfigEntry, ProviderConfig};
//! use voxtral_stt::stt::{MistralSpeechToText, SpeechToText};
//!
//! #[tokio::main]
//! async fn main() {
//!     let entry = ConfigEntry::new(ProviderConfig::new("sk-...", None, None));
//!     let stt = MistralSpeechToText::from_entry(&entry).unwrap();
//!
//!     // 1 s of 16 kHz, 16-bit mono silence in two chunks
//!     let chunks = stream::iter(vec![vec![0u8; 16_000], vec![0u8; 16_000]]);
//!     let result = stt
//!         .process_audio_stream(AudioMetadata::default(), Box::pin(chunks))
//!         .await;
//!     println!("{:?}: {}", result.state, result.text);
//! }
//! ```

pub mod capabilities;
pub mod consumer;
pub mod engine;
pub mod transcribe;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use capabilities::{Capabilities, DeviceEntryType, DeviceInfo, VOXTRAL_CAPABILITIES};
pub use consumer::{consume_events, ConsumerState, StreamConsumer};
pub use engine::{AudioStream, MistralSpeechToText, SpeechToText, SttError};
pub use transcribe::{ResultState, TranscriptionResult};

// test-only re-export so other test modules can script a backend without
// `use crate::stt::engine::MockTranscriptionClient`.
#[cfg(test)]
pub use engine::MockTranscriptionClient;
