//! Whole-request audio accumulation.
//!
//! The backend accepts one complete file per request, so every chunk of the
//! incoming stream is appended, in arrival order, to an [`AudioBuffer`] before
//! any framing happens.
//!
//! # Example
//!
//! ```rust
//! use futures_util::stream;
//! use voxtral_stt::audio::AudioBuffer;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let chunks = stream::iter(vec![vec![1u8, 2], vec![3]]);
//! let buf = rt.block_on(AudioBuffer::collect(chunks));
//! assert_eq!(buf.as_bytes(), &[1, 2, 3]);
//! ```

use futures_util::{pin_mut, Stream, StreamExt};

use super::metadata::AudioMetadata;

// ---------------------------------------------------------------------------
// AudioBuffer
// ---------------------------------------------------------------------------

/// An ordered, growable byte buffer holding one request's raw PCM audio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioBuffer {
    bytes: Vec<u8>,
}

impl AudioBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `stream` to completion, concatenating every chunk.
    ///
    /// Suspends between chunks; dropping the returned future abandons the
    /// partially collected audio.
    pub async fn collect<S, B>(stream: S) -> Self
    where
        S: Stream<Item = B>,
        B: AsRef<[u8]>,
    {
        pin_mut!(stream);

        let mut buf = Self::new();
        while let Some(chunk) = stream.next().await {
            buf.push_slice(chunk.as_ref());
        }
        buf
    }

    /// Append `data` after everything received so far.
    pub fn push_slice(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Recording duration in seconds under `metadata`'s format.
    pub fn duration_secs(&self, metadata: &AudioMetadata) -> f32 {
        metadata.duration_secs(self.bytes.len())
    }
}

impl From<Vec<u8>> for AudioBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
