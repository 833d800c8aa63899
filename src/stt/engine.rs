//! Speech-to-text provider trait and the Mistral-backed implementation.
//!
//! # Overview
//!
//! [`SpeechToText`] is the interface the host calls: it advertises static
//! capabilities and turns one audio stream into one [`TranscriptionResult`].
//! It is object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn SpeechToText>`.
//!
//! [`MistralSpeechToText`] is the production implementation.  It owns a
//! shared [`TranscriptionClient`] handle plus the read-only settings of one
//! [`ConfigEntry`]; nothing mutable is shared between requests.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::Stream;
use thiserror::Error;

use crate::audio::{AudioBuffer, AudioMetadata, FramingError};
use crate::client::{ClientError, MistralClient, TranscriptionClient, TranscriptionRequest};
use crate::config::ConfigEntry;
use crate::stt::capabilities::{Capabilities, DeviceInfo, VOXTRAL_CAPABILITIES};
use crate::stt::consumer::consume_events;
use crate::stt::transcribe::TranscriptionResult;

// ---------------------------------------------------------------------------
// SttError
// ---------------------------------------------------------------------------

/// Everything that can go wrong while processing one audio stream.
///
/// None of these cross back into the host: [`SpeechToText::process_audio_stream`]
/// logs them and returns an error result instead.
#[derive(Debug, Error)]
pub enum SttError {
    /// The metadata does not describe a valid WAV container.
    #[error("audio framing failed: {0}")]
    Framing(#[from] FramingError),

    /// The backend rejected the credentials.
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// The backend could not be reached.
    #[error("cannot reach transcription backend: {0}")]
    Connectivity(String),

    /// The event stream closed without a terminal event.
    #[error("speech-to-text stream never completed")]
    IncompleteStream,

    /// Any other submission or consumption failure.
    #[error("transcription failed: {0}")]
    Unclassified(String),
}

impl From<ClientError> for SttError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Authentication(msg) => SttError::Authentication(msg),
            ClientError::Connection(msg) => SttError::Connectivity(msg),
            other => SttError::Unclassified(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechToText trait
// ---------------------------------------------------------------------------

/// Raw audio chunks as delivered by the host, in arrival order.
pub type AudioStream = Pin<Box<dyn Stream<Item = Vec<u8>> + Send>>;

/// Host-facing speech-to-text provider.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Static description of accepted audio.
    fn capabilities(&self) -> &Capabilities;

    /// `true` when the provider can handle audio described by `metadata`.
    fn supports(&self, metadata: &AudioMetadata) -> bool {
        self.capabilities().supports(metadata)
    }

    /// Consume `stream` completely, transcribe it, and return exactly one
    /// result.  Never fails: every error becomes [`TranscriptionResult::error`].
    ///
    /// Dropping the returned future abandons the in-flight request without
    /// producing a result.
    async fn process_audio_stream(
        &self,
        metadata: AudioMetadata,
        stream: AudioStream,
    ) -> TranscriptionResult;
}

// Compile-time assertion: Box<dyn SpeechToText> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechToText>) {}
};

// ---------------------------------------------------------------------------
// MistralSpeechToText
// ---------------------------------------------------------------------------

/// Provider for one configured entry, backed by the Mistral transcription API.
pub struct MistralSpeechToText {
    unique_id: String,
    name: String,
    device_info: DeviceInfo,
    client: Arc<dyn TranscriptionClient>,
    model: String,
    temperature: f32,
    default_language: Option<String>,
}

impl std::fmt::Debug for MistralSpeechToText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralSpeechToText")
            .field("unique_id", &self.unique_id)
            .field("name", &self.name)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl MistralSpeechToText {
    /// Build a provider for `entry` on top of an existing client handle.
    pub fn new(entry: &ConfigEntry, client: Arc<dyn TranscriptionClient>) -> Self {
        Self {
            unique_id: entry.entry_id.clone(),
            name: entry.title.clone(),
            device_info: DeviceInfo::mistral_service(&entry.entry_id),
            client,
            model: entry.effective_model().to_string(),
            temperature: entry.effective_temperature(),
            default_language: entry.options.language.clone(),
        }
    }

    /// Build a provider for `entry` with a freshly created [`MistralClient`].
    ///
    /// Entry options are validated first; an out-of-range temperature is
    /// rejected as [`ClientError::InvalidRequest`].
    pub fn from_entry(entry: &ConfigEntry) -> Result<Self, ClientError> {
        entry.options.validate().map_err(|e| {
            log::error!("Invalid options for entry {}: {e}", entry.entry_id);
            ClientError::InvalidRequest(e.to_string())
        })?;
        let client = MistralClient::from_config(&entry.data).map_err(|e| {
            log::error!("Error creating Mistral client: {e}");
            e
        })?;
        Ok(Self::new(entry, Arc::new(client)))
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Frame, submit and consume: the fallible core of one request.
    ///
    /// The metadata's language hint wins over the entry's configured default.
    pub async fn transcribe(
        &self,
        metadata: &AudioMetadata,
        buffer: &AudioBuffer,
    ) -> Result<String, SttError> {
        fn nonblank(l: &&str) -> bool {
            !l.trim().is_empty()
        }

        let language = metadata
            .language
            .as_deref()
            .filter(nonblank)
            .or_else(|| self.default_language.as_deref().filter(nonblank))
            .map(str::to_string);

        let request = TranscriptionRequest::from_buffer(
            self.model.clone(),
            buffer,
            metadata,
            language,
            self.temperature,
        )?;

        log::debug!("Sending request to Mistral AI endpoint");
        let events = self.client.submit(request).await?;
        consume_events(events).await
    }
}

#[async_trait]
impl SpeechToText for MistralSpeechToText {
    fn capabilities(&self) -> &Capabilities {
        &VOXTRAL_CAPABILITIES
    }

    async fn process_audio_stream(
        &self,
        metadata: AudioMetadata,
        stream: AudioStream,
    ) -> TranscriptionResult {
        log::debug!(
            "Start processing audio stream for language: {}",
            metadata.language.as_deref().unwrap_or("<unspecified>")
        );

        let buffer = AudioBuffer::collect(stream).await;
        log::debug!(
            "Audio data size: {} bytes ({:.2}s)",
            buffer.len(),
            buffer.duration_secs(&metadata)
        );

        match self.transcribe(&metadata, &buffer).await {
            Ok(text) => TranscriptionResult::success(text),
            Err(e) => {
                log::error!("Speech-to-text failed: {e}");
                TranscriptionResult::error()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MockTranscriptionClient  (test-only)
// ---------------------------------------------------------------------------

/// A test double that replays a scripted event sequence and records every
/// request it receives.
#[cfg(test)]
pub struct MockTranscriptionClient {
    script: Result<Vec<Result<crate::client::TranscriptionEvent, ClientError>>, ClientError>,
    requests: std::sync::Mutex<Vec<TranscriptionRequest>>,
}

#[cfg(test)]
impl MockTranscriptionClient {
    /// Accept every submission and replay `events`.
    pub fn events(events: Vec<Result<crate::client::TranscriptionEvent, ClientError>>) -> Self {
        Self {
            script: Ok(events),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Reject every submission with `error`.
    pub fn failing(error: ClientError) -> Self {
        Self {
            script: Err(error),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TranscriptionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl TranscriptionClient for MockTranscriptionClient {
    async fn submit(
        &self,
        request: TranscriptionRequest,
    ) -> Result<crate::client::EventStream, ClientError> {
        self.requests.lock().unwrap().push(request);
        let events = self.script.clone()?;
        Ok(Box::pin(futures_util::stream::iter(events)))
    }

    async fn retrieve_model(&self, model_id: &str) -> Result<crate::client::ModelInfo, ClientError> {
        self.script.as_ref().map_err(Clone::clone)?;
        Ok(crate::client::ModelInfo {
            id: model_id.to_string(),
            owned_by: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
