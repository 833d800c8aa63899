//! Stream consumer: the per-request result state machine.
//!
//! ```text
//! Streaming ──Done event──────────────▶ Success(text)
//!           ──stream exhausted────────▶ Error (IncompleteStream)
//!           ──transport/decode error──▶ Error
//! ```
//!
//! Intermediate events are discarded.  Once a terminal state is reached no
//! further events are pulled from the underlying stream.

use futures_util::{pin_mut, Stream, StreamExt};

use crate::client::{ClientError, TranscriptionEvent};
use crate::stt::engine::SttError;

// ---------------------------------------------------------------------------
// ConsumerState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsumerState {
    /// Events are still being read.
    #[default]
    Streaming,
    /// The terminal event was observed.
    Success,
    /// The stream failed or ended early.
    Error,
}

impl ConsumerState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConsumerState::Streaming)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsumerState::Streaming => "Streaming",
            ConsumerState::Success => "Success",
            ConsumerState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// StreamConsumer
// ---------------------------------------------------------------------------

/// Tracks one response sequence until it reaches a terminal state.
#[derive(Debug, Default)]
pub struct StreamConsumer {
    state: ConsumerState,
    discarded: usize,
    outcome: Option<Result<String, SttError>>,
}

impl StreamConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConsumerState {
        self.state
    }

    /// Number of intermediate events dropped so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Feed the next item of the sequence.  Ignored once terminal.
    pub fn observe(&mut self, item: Result<TranscriptionEvent, ClientError>) -> ConsumerState {
        if self.state.is_terminal() {
            return self.state;
        }

        match item {
            Ok(TranscriptionEvent::Done { text, .. }) => {
                self.state = ConsumerState::Success;
                self.outcome = Some(Ok(text));
            }
            Ok(event) => {
                log::trace!("Discarding intermediate '{}' event", event.kind());
                self.discarded += 1;
            }
            Err(e) => {
                self.state = ConsumerState::Error;
                self.outcome = Some(Err(e.into()));
            }
        }
        self.state
    }

    /// Record that the sequence ended.  Without a prior terminal event this
    /// is an incomplete stream.
    pub fn end_of_stream(&mut self) -> ConsumerState {
        if !self.state.is_terminal() {
            self.state = ConsumerState::Error;
            self.outcome = Some(Err(SttError::IncompleteStream));
        }
        self.state
    }

    /// The transcript, or the reason there is none.
    pub fn finish(mut self) -> Result<String, SttError> {
        self.end_of_stream();
        self.outcome.unwrap_or(Err(SttError::IncompleteStream))
    }
}

/// Drive `events` through a [`StreamConsumer`] and return the final transcript.
pub async fn consume_events<S>(events: S) -> Result<String, SttError>
where
    S: Stream<Item = Result<TranscriptionEvent, ClientError>>,
{
    pin_mut!(events);

    let mut consumer = StreamConsumer::new();
    while !consumer.state().is_terminal() {
        match events.next().await {
            Some(item) => {
                consumer.observe(item);
            }
            None => {
                consumer.end_of_stream();
            }
        }
    }

    log::debug!(
        "Event stream finished in state {} after discarding {} event(s)",
        consumer.state().label(),
        consumer.discarded()
    );
    consumer.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
