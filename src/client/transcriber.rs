//! Core `TranscriptionClient` trait and `MistralClient` implementation.
//!
//! `MistralClient` calls the Mistral `/v1/audio/transcriptions` endpoint in
//! streaming mode and exposes the server-sent events as a lazy
//! [`EventStream`].  All connection details come from [`ProviderConfig`];
//! the underlying `reqwest::Client` can be injected so one connection pool
//! is shared across every request.

use std::collections::VecDeque;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{stream, Stream, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::client::error::ClientError;
use crate::client::event::TranscriptionEvent;
use crate::client::request::{TranscriptionRequest, AUDIO_CONTENT_TYPE, AUDIO_FILE_NAME};
use crate::client::sse::{SseDecoder, SseFrame};
use crate::config::ProviderConfig;

// ---------------------------------------------------------------------------
// EventStream
// ---------------------------------------------------------------------------

/// Lazy, finite, non-restartable sequence of response events.
///
/// Dropping it abandons the underlying HTTP response.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<TranscriptionEvent, ClientError>> + Send>>;

struct DecodeState<S> {
    body: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<TranscriptionEvent, ClientError>>,
    finished: bool,
}

impl<S> DecodeState<S> {
    fn enqueue(&mut self, frame: SseFrame) {
        match TranscriptionEvent::from_frame(&frame) {
            Ok(Some(event)) => self.pending.push_back(Ok(event)),
            Ok(None) => {}
            Err(e) => self.pending.push_back(Err(e)),
        }
    }
}

/// Turn a raw SSE byte stream into an [`EventStream`].
///
/// The stream ends after the body closes or after the first error, which is
/// yielded once.
pub fn decode_event_stream<S, B, E>(body: S) -> EventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    let state = DecodeState {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.pending.pop_front() {
                if item.is_err() {
                    st.finished = true;
                    st.pending.clear();
                }
                return Some((item, st));
            }
            if st.finished {
                return None;
            }

            match st.body.next().await {
                Some(Ok(chunk)) => {
                    for frame in st.decoder.push(chunk.as_ref()) {
                        st.enqueue(frame);
                    }
                }
                Some(Err(e)) => st.pending.push_back(Err(e.into())),
                None => {
                    st.finished = true;
                    if let Some(frame) = st.decoder.finish() {
                        st.enqueue(frame);
                    }
                }
            }
        }
    }))
}

// ---------------------------------------------------------------------------
// ModelInfo
// ---------------------------------------------------------------------------

/// Subset of the model metadata returned by `GET /v1/models/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub owned_by: Option<String>,
}

// ---------------------------------------------------------------------------
// TranscriptionClient trait
// ---------------------------------------------------------------------------

/// Async interface to a streaming transcription backend.
///
/// Implementors must be `Send + Sync` so a single handle can be shared by
/// every request (e.g. wrapped in `Arc<dyn TranscriptionClient>`).  No
/// implementation retries: a failure is returned to the caller as-is.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Submit one request and return its event stream once the backend has
    /// accepted it.
    async fn submit(&self, request: TranscriptionRequest) -> Result<EventStream, ClientError>;

    /// Fetch metadata for `model_id`; used as the setup-time credential probe.
    async fn retrieve_model(&self, model_id: &str) -> Result<ModelInfo, ClientError>;
}

// ---------------------------------------------------------------------------
// MistralClient
// ---------------------------------------------------------------------------

/// Talks to the Mistral La Plateforme API (or any server exposing the same
/// routes at `base_url`).
#[derive(Clone)]
pub struct MistralClient {
    http: reqwest::Client,
    api_root: String,
    api_key: String,
}

impl std::fmt::Debug for MistralClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralClient")
            .field("api_root", &self.api_root)
            .finish_non_exhaustive()
    }
}

impl MistralClient {
    /// Build a client with its own connection pool.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Build a client on top of an existing `reqwest::Client`.
    pub fn with_http_client(config: &ProviderConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_root: config.api_root().to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    /// `{api_root}/v1/models/{model_id}` with the id escaped as a single
    /// path segment.
    fn model_url(&self, model_id: &str) -> Result<reqwest::Url, ClientError> {
        let mut url = reqwest::Url::parse(&self.api_root)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["v1", "models", model_id]);
        Ok(url)
    }
}

#[async_trait]
impl TranscriptionClient for MistralClient {
    async fn submit(&self, request: TranscriptionRequest) -> Result<EventStream, ClientError> {
        let url = self.url("/v1/audio/transcriptions");
        log::debug!(
            "Submitting {} byte(s) of audio to {url} (model: {})",
            request.audio.len(),
            request.model
        );

        let file = Part::bytes(request.audio)
            .file_name(AUDIO_FILE_NAME)
            .mime_str(AUDIO_CONTENT_TYPE)?;

        let mut form = Form::new()
            .text("model", request.model)
            .part("file", file)
            .text("temperature", request.temperature.to_string())
            .text("stream", "true");

        if let Some(language) = request.language {
            form = form.text("language", language);
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "text/event-stream")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, body));
        }

        Ok(decode_event_stream(response.bytes_stream()))
    }

    async fn retrieve_model(&self, model_id: &str) -> Result<ModelInfo, ClientError> {
        let url = self.model_url(model_id)?;
        log::debug!("Retrieving model metadata from {url}");

        let response = self.http.get(url).bearer_auth(&self.api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, body));
        }

        Ok(response.json::<ModelInfo>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
