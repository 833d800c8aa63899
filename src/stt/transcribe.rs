//! Result types returned to the host.
//!
//! [`TranscriptionResult`] is the only externally observable output of one
//! processing cycle: exactly one is produced per incoming audio stream.

use serde::Serialize;

// ---------------------------------------------------------------------------
// ResultState
// ---------------------------------------------------------------------------

/// Outcome of one processing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultState {
    Success,
    Error,
}

// ---------------------------------------------------------------------------
// TranscriptionResult
// ---------------------------------------------------------------------------

/// Final transcript handed back to the host.  Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionResult {
    /// Transcript text; always empty when `state` is [`ResultState::Error`].
    pub text: String,
    pub state: ResultState,
}

impl TranscriptionResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: ResultState::Success,
        }
    }

    pub fn error() -> Self {
        Self {
            text: String::new(),
            state: ResultState::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == ResultState::Success
    }
}
