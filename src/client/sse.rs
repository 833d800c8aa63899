//! Incremental server-sent-events decoder.
//!
//! Network chunks do not respect line boundaries, so [`SseDecoder`] buffers
//! partial lines and only emits an [`SseFrame`] once its terminating blank
//! line has arrived.  Field handling follows the EventSource format: `event`
//! and `data` are kept, `id`/`retry`/unknown fields and `:` comments are
//! skipped, and several `data` lines are joined with `\n`.

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Value of the `event:` field, if any.
    pub event: Option<String>,
    /// Concatenated `data:` lines.
    pub data: String,
}

/// Stateful line decoder; feed it with [`push`](Self::push) and call
/// [`finish`](Self::finish) once the body ends.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes after the last complete line.
    partial: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `chunk` and return every frame it completes, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.partial.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.partial.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.partial.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if let Some(frame) = self.process_line(&String::from_utf8_lossy(&line)) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Flush whatever is pending when the body closes without a final blank line.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            let line = String::from_utf8_lossy(&line);
            if let Some(frame) = self.process_line(line.trim_end_matches('\r')) {
                return Some(frame);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseFrame { event, data })
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
    fn single_complete_frame() {
        let mut dec = SseDecoder::new();
        let frames = dec.push(b"event: transcription.done\ndata: {\"a\":1}\n\n");
        assert_eq!(frames, vec![frame(Some("transcription.done"), "{\"a\":1}")]);
    }

    #[test]
    fn frame_split_across_chunks() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"event: x\nda").is_empty());
        assert!(dec.push(b"ta: hel").is_empty());
        assert!(dec.push(b"lo\n").is_empty());
        assert_eq!(dec.push(b"\n"), vec![frame(Some("x"), "hello")]);
    }

    #[test]
    fn crlf_line_endings() {
        let mut dec = SseDecoder::new();
        let frames = dec.push(b"data: one\r\n\r\ndata: two\r\n\r\n");
        assert_eq!(frames, vec![frame(None, "one"), frame(None, "two")]);
    }

    #[test]
    fn multi_line_data_is_joined() {
        let mut dec = SseDecoder::new();
        let frames = dec.push(b"data: a\ndata: b\n\n");
        assert_eq!(frames, vec![frame(None, "a\nb")]);
    }

    #[test]
    fn comments_and_unknown_fields_are_skipped() {
        let mut dec = SseDecoder::new();
        let frames = dec.push(b": keep-alive\nid: 7\nretry: 100\ndata:x\n\n");
        assert_eq!(frames, vec![frame(None, "x")]);
    }

    #[test]
    fn blank_lines_without_data_emit_nothing() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"\n\nevent: ping\n\n").is_empty());
    }

    #[test]
    fn finish_flushes_unterminated_frame() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: tail").is_empty());
        assert_eq!(dec.finish(), Some(frame(None, "tail")));
        assert_eq!(dec.finish(), None);
    }

    #[test]
    fn multibyte_text_split_mid_character() {
        let text = "data: héllo\n\n".as_bytes();
        let split = text.iter().position(|&b| b == 0xc3).unwrap() + 1;

        let mut dec = SseDecoder::new();
        assert!(dec.push(&text[..split]).is_empty());
        assert_eq!(dec.push(&text[split..]), vec![frame(None, "héllo")]);
    }
}
