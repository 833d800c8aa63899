//! Per-call transcription request.

use crate::audio::{frame_wav, AudioBuffer, AudioMetadata, FramingError};

/// File name attached to the uploaded audio part.
pub const AUDIO_FILE_NAME: &str = "audio.wav";

/// MIME type of the uploaded audio part.
pub const AUDIO_CONTENT_TYPE: &str = "audio/wav";

// ---------------------------------------------------------------------------
// TranscriptionRequest
// ---------------------------------------------------------------------------

/// Everything sent to the backend for one audio stream.  Built once per call
/// and consumed by [`TranscriptionClient::submit`](super::TranscriptionClient::submit).
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRequest {
    /// Model identifier, e.g. `"voxtral-mini-latest"`.
    pub model: String,
    /// WAV-framed audio.
    pub audio: Vec<u8>,
    /// ISO-639-1 language hint; omitted from the request when `None`.
    pub language: Option<String>,
    /// Sampling temperature within `[0, 1]`.
    pub temperature: f32,
}

impl TranscriptionRequest {
    /// Frame `buffer` according to `metadata` and wrap it in a request.
    pub fn from_buffer(
        model: impl Into<String>,
        buffer: &AudioBuffer,
        metadata: &AudioMetadata,
        language: Option<String>,
        temperature: f32,
    ) -> Result<Self, FramingError> {
        let audio = frame_wav(buffer.as_bytes(), metadata)?;
        Ok(Self {
            model: model.into(),
            audio,
            language: language.filter(|l| !l.trim().is_empty()),
            temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_buffer_frames_audio() {
        let buf = AudioBuffer::from(vec![0u8; 320]);
        let req = TranscriptionRequest::from_buffer(
            "voxtral-mini-latest",
            &buf,
            &AudioMetadata::default(),
            Some("en".into()),
            0.0,
        )
        .unwrap();

        assert_eq!(&req.audio[0..4], b"RIFF");
        assert_eq!(req.language.as_deref(), Some("en"));
        assert_eq!(req.model, "voxtral-mini-latest");
    }

    #[test]
    fn blank_language_is_dropped() {
        let buf = AudioBuffer::from(vec![0u8; 2]);
        let req = TranscriptionRequest::from_buffer(
            "m",
            &buf,
            &AudioMetadata::default(),
            Some(" ".into()),
            0.0,
        )
        .unwrap();
        assert!(req.language.is_none());
    }

    #[test]
    fn two_requests_from_one_buffer_are_independent() {
        let buf = AudioBuffer::from(vec![1u8; 64]);
        let meta = AudioMetadata::default();
        let mut a = TranscriptionRequest::from_buffer("m", &buf, &meta, None, 0.0).unwrap();
        let b = TranscriptionRequest::from_buffer("m", &buf, &meta, None, 0.0).unwrap();
        assert_eq!(a, b);

        a.audio.clear();
        assert!(!b.audio.is_empty());
    }

    #[test]
    fn framing_errors_propagate() {
        let buf = AudioBuffer::from(vec![0u8; 2]);
        let meta = AudioMetadata {
            channel_count: 0,
            ..AudioMetadata::default()
        };
        assert!(TranscriptionRequest::from_buffer("m", &buf, &meta, None, 0.0).is_err());
    }
}
