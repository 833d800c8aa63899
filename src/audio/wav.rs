//! WAV framing of raw PCM audio.
//!
//! The transcription backend expects a self-describing file, so the raw bytes
//! collected from the host are wrapped in a RIFF/WAVE container whose channel
//! count, sample width and frame rate are copied verbatim from the
//! [`AudioMetadata`].  Samples are little-endian signed integers, except 8-bit
//! audio which WAV stores unsigned; either way the payload bytes come out
//! exactly as they went in.
//!
//! # Example
//!
//! ```rust
//! use voxtral_stt::audio::{frame_wav, AudioMetadata};
//!
//! let wav = frame_wav(&[0u8; 32_000], &AudioMetadata::default()).unwrap();
//! assert_eq!(&wav[0..4], b"RIFF");
//! assert_eq!(&wav[8..12], b"WAVE");
//! ```

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use thiserror::Error;

use super::metadata::AudioMetadata;

/// Widest sample the container writer supports.
const MAX_BIT_DEPTH: u16 = 32;

// ---------------------------------------------------------------------------
// FramingError
// ---------------------------------------------------------------------------

/// Metadata or encoder problems that prevent building a valid container.
#[derive(Debug, Error)]
pub enum FramingError {
    #[error("channel count must be at least 1")]
    NoChannels,

    #[error("bit depth {0} is not a multiple of 8 in 8..=32")]
    UnsupportedBitDepth(u16),

    #[error("sample rate must be greater than 0")]
    ZeroSampleRate,

    /// Byte rate or block alignment does not fit the header fields.
    #[error("{sample_rate} Hz x {channels} channel(s) x {bit_depth} bit does not fit a WAV header")]
    HeaderOverflow {
        sample_rate: u32,
        bit_depth: u16,
        channels: u16,
    },

    /// The WAV encoder rejected the spec or failed while writing.
    #[error("WAV encoding failed: {0}")]
    Encode(#[from] hound::Error),
}

// ---------------------------------------------------------------------------
// frame_wav
// ---------------------------------------------------------------------------

/// Build the `hound` spec for `metadata`, rejecting shapes WAV cannot express.
pub fn wav_spec(metadata: &AudioMetadata) -> Result<WavSpec, FramingError> {
    if metadata.channel_count == 0 {
        return Err(FramingError::NoChannels);
    }
    if metadata.bit_depth == 0 || metadata.bit_depth % 8 != 0 || metadata.bit_depth > MAX_BIT_DEPTH
    {
        return Err(FramingError::UnsupportedBitDepth(metadata.bit_depth));
    }
    if metadata.sample_rate == 0 {
        return Err(FramingError::ZeroSampleRate);
    }

    // The header stores the block alignment as u16 and the byte rate as u32.
    let width = metadata.bit_depth / 8;
    let block_align = width.checked_mul(metadata.channel_count);
    let byte_rate = block_align.and_then(|b| metadata.sample_rate.checked_mul(u32::from(b)));
    if byte_rate.is_none() {
        return Err(FramingError::HeaderOverflow {
            sample_rate: metadata.sample_rate,
            bit_depth: metadata.bit_depth,
            channels: metadata.channel_count,
        });
    }

    Ok(WavSpec {
        channels: metadata.channel_count,
        sample_rate: metadata.sample_rate,
        bits_per_sample: metadata.bit_depth,
        sample_format: SampleFormat::Int,
    })
}

/// Wrap `pcm` in a WAV container described by `metadata`.
///
/// Trailing bytes that do not fill a whole frame are dropped.
pub fn frame_wav(pcm: &[u8], metadata: &AudioMetadata) -> Result<Vec<u8>, FramingError> {
    let spec = wav_spec(metadata)?;
    let width = metadata.sample_width();
    let frame = metadata.frame_size();

    let whole = pcm.len() - pcm.len() % frame;
    if whole < pcm.len() {
        log::warn!(
            "Dropping {} trailing byte(s) that do not form a whole {}-byte frame",
            pcm.len() - whole,
            frame
        );
    }

    let mut out = Cursor::new(Vec::with_capacity(whole + 44));
    {
        let mut writer = WavWriter::new(&mut out, spec)?;

        for sample in pcm[..whole].chunks_exact(width) {
            match *sample {
                [b] => writer.write_sample(b.wrapping_sub(128) as i8)?,
                [lo, hi] => writer.write_sample(i16::from_le_bytes([lo, hi]))?,
                // Shift up and back down to sign-extend the 24-bit value.
                [b0, b1, b2] => writer.write_sample(i32::from_le_bytes([0, b0, b1, b2]) >> 8)?,
                [b0, b1, b2, b3] => writer.write_sample(i32::from_le_bytes([b0, b1, b2, b3]))?,
                _ => return Err(FramingError::UnsupportedBitDepth(metadata.bit_depth)),
            }
        }

        writer.finalize()?;
    }

    Ok(out.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
