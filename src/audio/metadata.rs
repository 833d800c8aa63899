//! Audio stream metadata and the static capability enums advertised to the host.
//!
//! [`AudioMetadata`] accompanies every incoming stream and is immutable for the
//! duration of one request.  The capability enums mirror the values a host
//! platform negotiates with a speech provider; they are advertised, never
//! negotiated at runtime.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AudioMetadata
// ---------------------------------------------------------------------------

/// Description of the raw PCM bytes in one incoming audio stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    /// Frames per second, in Hz.
    pub sample_rate: u32,
    /// Bits per sample; the sample width in bytes is `bit_depth / 8`.
    pub bit_depth: u16,
    /// Number of interleaved channels.
    pub channel_count: u16,
    /// ISO-639-1 language hint, if the host knows the spoken language.
    pub language: Option<String>,
}

impl AudioMetadata {
    /// Sample width in bytes, truncating any remainder.
    pub fn sample_width(&self) -> usize {
        usize::from(self.bit_depth / 8)
    }

    /// Bytes per frame (one sample for every channel).
    pub fn frame_size(&self) -> usize {
        self.sample_width() * usize::from(self.channel_count)
    }

    /// Playback length of `byte_len` bytes of audio in seconds.
    pub fn duration_secs(&self, byte_len: usize) -> f32 {
        let frame = self.frame_size();
        if frame == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        (byte_len / frame) as f32 / self.sample_rate as f32
    }
}

impl Default for AudioMetadata {
    /// 16 kHz, 16-bit, mono with no language hint: the format every host
    /// pipeline is expected to deliver.
    fn default() -> Self {
        Self {
            sample_rate: SampleRate::Hz16000.hz(),
            bit_depth: BitDepth::Bits16.bits(),
            channel_count: AudioChannels::Mono.count(),
            language: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Capability enums
// ---------------------------------------------------------------------------

/// Container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Ogg,
}

/// Sample codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Pcm,
    Opus,
}

/// Bits per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    Bits8,
    Bits16,
    Bits24,
    Bits32,
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Bits8 => 8,
            BitDepth::Bits16 => 16,
            BitDepth::Bits24 => 24,
            BitDepth::Bits32 => 32,
        }
    }
}

/// Sample rates a host may deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleRate {
    Hz8000,
    Hz11000,
    Hz16000,
    Hz18900,
    Hz22000,
    Hz32000,
    Hz37800,
    Hz44100,
    Hz48000,
}

impl SampleRate {
    pub fn hz(self) -> u32 {
        match self {
            SampleRate::Hz8000 => 8_000,
            SampleRate::Hz11000 => 11_000,
            SampleRate::Hz16000 => 16_000,
            SampleRate::Hz18900 => 18_900,
            SampleRate::Hz22000 => 22_000,
            SampleRate::Hz32000 => 32_000,
            SampleRate::Hz37800 => 37_800,
            SampleRate::Hz44100 => 44_100,
            SampleRate::Hz48000 => 48_000,
        }
    }
}

/// Channel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioChannels {
    Mono,
    Stereo,
}

impl AudioChannels {
    pub fn count(self) -> u16 {
        match self {
            AudioChannels::Mono => 1,
            AudioChannels::Stereo => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
