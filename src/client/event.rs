//! Events decoded from the streamed transcription response.

use serde::Deserialize;

use super::error::ClientError;
use super::sse::SseFrame;

/// Data payload some servers send as an end-of-stream sentinel.
const DONE_SENTINEL: &str = "[DONE]";

// ---------------------------------------------------------------------------
// TranscriptionEvent
// ---------------------------------------------------------------------------

/// One element of the response sequence.  Only [`Done`](Self::Done) is
/// terminal; everything else is intermediate progress.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum TranscriptionEvent {
    /// Detected spoken language.
    #[serde(rename = "transcription.language")]
    Language {
        #[serde(default)]
        audio_language: Option<String>,
    },

    /// A time-aligned segment of the transcript.
    #[serde(rename = "transcription.segment")]
    Segment {
        text: String,
        #[serde(default)]
        start: f64,
        #[serde(default)]
        end: f64,
    },

    /// Incremental text.
    #[serde(rename = "transcription.text.delta")]
    TextDelta { text: String },

    /// Final event carrying the complete transcript.
    #[serde(rename = "transcription.done")]
    Done {
        text: String,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },

    /// An event type this client does not know about.
    #[serde(other)]
    Unknown,
}

impl TranscriptionEvent {
    /// `true` for the event that ends the sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TranscriptionEvent::Done { .. })
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptionEvent::Language { .. } => "language",
            TranscriptionEvent::Segment { .. } => "segment",
            TranscriptionEvent::TextDelta { .. } => "text.delta",
            TranscriptionEvent::Done { .. } => "done",
            TranscriptionEvent::Unknown => "unknown",
        }
    }

    /// Decode an SSE frame.
    ///
    /// Returns `Ok(None)` for frames that carry no event (empty data or the
    /// `[DONE]` sentinel).  When the JSON payload lacks a `type` field, the
    /// frame's `event:` name is used instead.
    pub fn from_frame(frame: &SseFrame) -> Result<Option<Self>, ClientError> {
        let data = frame.data.trim();
        if data.is_empty() || data == DONE_SENTINEL {
            return Ok(None);
        }

        let mut value: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| ClientError::MalformedResponse(format!("event payload: {e}")))?;

        if let (Some(obj), Some(name)) = (value.as_object_mut(), frame.event.as_deref()) {
            obj.entry("type")
                .or_insert_with(|| serde_json::Value::String(name.to_string()));
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ClientError::MalformedResponse(format!("event shape: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(event: Option<&str>, data: &str) -> SseFrame {
        SseFrame {
            event: event.map(str::to_string),
            data: data.to_string(),
        }
    }

    #[test]
    fn decodes_done_event() {
        let f = frame(
            Some("transcription.done"),
            r#"{"type":"transcription.done","model":"voxtral-mini-2507","text":"hello world","usage":{"prompt_audio_seconds":1},"language":"en","segments":[]}"#,
        );
        let ev = TranscriptionEvent::from_frame(&f).unwrap().unwrap();
        assert!(ev.is_terminal());
        assert_eq!(
            ev,
            TranscriptionEvent::Done {
                text: "hello world".into(),
                model: Some("voxtral-mini-2507".into()),
                language: Some("en".into()),
            }
        );
    }

    #[test]
    fn decodes_intermediate_events() {
        let delta = frame(None, r#"{"type":"transcription.text.delta","text":"hel"}"#);
        assert_eq!(
            TranscriptionEvent::from_frame(&delta).unwrap(),
            Some(TranscriptionEvent::TextDelta { text: "hel".into() })
        );

        let lang = frame(None, r#"{"type":"transcription.language","audio_language":"fr"}"#);
        let ev = TranscriptionEvent::from_frame(&lang).unwrap().unwrap();
        assert_eq!(ev.kind(), "language");
        assert!(!ev.is_terminal());

        let seg = frame(
            None,
            r#"{"type":"transcription.segment","text":"hi","start":0.0,"end":0.5}"#,
        );
        assert!(matches!(
            TranscriptionEvent::from_frame(&seg).unwrap(),
            Some(TranscriptionEvent::Segment { .. })
        ));
    }

    #[test]
    fn event_name_fills_missing_type() {
        let f = frame(Some("transcription.done"), r#"{"text":"from event name"}"#);
        let ev = TranscriptionEvent::from_frame(&f).unwrap().unwrap();
        assert!(matches!(ev, TranscriptionEvent::Done { ref text, .. } if text == "from event name"));
    }

    #[test]
    fn payload_type_wins_over_event_name() {
        let f = frame(
            Some("transcription.done"),
            r#"{"type":"transcription.text.delta","text":"x"}"#,
        );
        let ev = TranscriptionEvent::from_frame(&f).unwrap().unwrap();
        assert!(!ev.is_terminal());
    }

    #[test]
    fn unknown_types_are_ignorable() {
        let f = frame(None, r#"{"type":"transcription.future_thing","x":1}"#);
        assert_eq!(
            TranscriptionEvent::from_frame(&f).unwrap(),
            Some(TranscriptionEvent::Unknown)
        );
    }

    #[test]
    fn sentinel_and_empty_frames_carry_no_event() {
        assert_eq!(TranscriptionEvent::from_frame(&frame(None, "[DONE]")).unwrap(), None);
        assert_eq!(TranscriptionEvent::from_frame(&frame(None, "  ")).unwrap(), None);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = TranscriptionEvent::from_frame(&frame(None, "{not json")).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[test]
    fn done_without_text_is_malformed() {
        let err =
            TranscriptionEvent::from_frame(&frame(None, r#"{"type":"transcription.done"}"#))
                .unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }
}
