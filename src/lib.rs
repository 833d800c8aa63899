//! Speech-to-text bridge to the Mistral Voxtral transcription API.
//!
//! Audio arrives from a host as a stream of raw PCM chunks, is framed as WAV,
//! submitted in streaming mode, and the backend's event stream is reduced to a
//! single success-or-error result.

pub mod audio;
pub mod client;
pub mod config;
pub mod setup;
pub mod stt;
