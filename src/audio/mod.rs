//! Audio handling: stream collection → WAV framing.
//!
//! # Pipeline
//!
//! ```text
//! host byte stream → AudioBuffer::collect → frame_wav(AudioMetadata) → WAV bytes
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futures_util::stream;
//! use voxtral_stt::audio::{frame_wav, AudioBuffer, AudioMetadata};
//!
//! # async fn run() -> Result<(), voxtral_stt::audio::FramingError> {
//! let metadata = AudioMetadata::default(); // 16 kHz, 16-bit, mono
//! let chunks = stream::iter(vec![vec![0u8; 16_000], vec![0u8; 16_000]]);
//!
//! let buffer = AudioBuffer::collect(chunks).await;
//! let wav = frame_wav(buffer.as_bytes(), &metadata)?;
//! println!("{} bytes of WAV for {:.1}s of audio", wav.len(), buffer.duration_secs(&metadata));
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod metadata;
pub mod wav;

pub use buffer::AudioBuffer;
pub use metadata::{AudioChannels, AudioCodec, AudioFormat, AudioMetadata, BitDepth, SampleRate};
pub use wav::{frame_wav, wav_spec, FramingError};
