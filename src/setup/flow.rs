//! Credential validation and entry creation.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::client::{ClientError, MistralClient, TranscriptionClient};
use crate::config::{
    ConfigEntry, ConfigError, EntryStore, ProviderConfig, DEFAULT_API_URL, DEFAULT_STT_MODEL,
};

// ---------------------------------------------------------------------------
// SetupError
// ---------------------------------------------------------------------------

/// Why a setup attempt was rejected.  Each variant maps to a distinct
/// operator-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("invalid API key")]
    InvalidAuth,

    #[error("cannot connect to the transcription service")]
    CannotConnect,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ConfigError),

    #[error("unexpected error while validating")]
    Unknown,
}

impl SetupError {
    /// Classify a probe failure.
    pub fn classify(err: &ClientError) -> Self {
        match err {
            ClientError::Authentication(_) => SetupError::InvalidAuth,
            ClientError::Connection(_) => SetupError::CannotConnect,
            _ => SetupError::Unknown,
        }
    }

    /// Stable key used to look up translated form errors.
    pub fn key(&self) -> &'static str {
        match self {
            SetupError::InvalidAuth => "invalid_auth",
            SetupError::CannotConnect => "cannot_connect",
            SetupError::InvalidInput(_) => "invalid_input",
            SetupError::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// SetupInput / SetupForm / SetupOutcome
// ---------------------------------------------------------------------------

/// Values entered by the operator.  Only the API key is required.
#[derive(Clone, Default, Deserialize)]
pub struct SetupInput {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl std::fmt::Debug for SetupInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetupInput")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl SetupInput {
    /// Apply defaults for omitted fields.
    pub fn into_config(self) -> ProviderConfig {
        ProviderConfig::new(self.api_key, self.base_url, self.model)
    }
}

/// Defaults shown alongside the setup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    pub default_url: &'static str,
    pub default_model: &'static str,
}

/// Result of one setup attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupOutcome {
    /// Validation passed; the entry was added to the store.
    Created(ConfigEntry),
    /// An entry with the same settings already exists; nothing was probed.
    AlreadyConfigured,
    /// Validation failed; the store is unchanged.
    Invalid(SetupError),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Issue the lightweight probe that proves `config`'s credentials work.
pub async fn validate_input(
    client: &dyn TranscriptionClient,
    config: &ProviderConfig,
) -> Result<(), ClientError> {
    log::debug!("Retrieving model '{}' to test the API key", config.model);
    client.retrieve_model(&config.model).await.map(|_| ())
}

/// Default client factory: one [`MistralClient`] per configuration.
pub fn connect_mistral(config: &ProviderConfig) -> Result<Arc<dyn TranscriptionClient>, ClientError> {
    Ok(Arc::new(MistralClient::from_config(config)?))
}

// ---------------------------------------------------------------------------
// SetupFlow
// ---------------------------------------------------------------------------

/// Drives setup attempts with an injected client factory, so tests and
/// alternative transports can stand in for the real backend.
pub struct SetupFlow<F> {
    connect: F,
}

impl SetupFlow<fn(&ProviderConfig) -> Result<Arc<dyn TranscriptionClient>, ClientError>> {
    /// A flow that validates against the real Mistral API.
    pub fn mistral() -> Self {
        Self::new(connect_mistral)
    }
}

impl<F> SetupFlow<F>
where
    F: Fn(&ProviderConfig) -> Result<Arc<dyn TranscriptionClient>, ClientError>,
{
    pub fn new(connect: F) -> Self {
        Self { connect }
    }

    pub fn form(&self) -> SetupForm {
        SetupForm {
            default_url: DEFAULT_API_URL,
            default_model: DEFAULT_STT_MODEL,
        }
    }

    /// Validate `input` and, only on success, add a new entry to `store`.
    ///
    /// Saving the store to disk is left to the caller.
    pub async fn submit(&self, store: &mut EntryStore, input: SetupInput) -> SetupOutcome {
        let config = input.into_config();

        if store.find_matching(&config).is_some() {
            log::info!("An entry with these settings already exists");
            return SetupOutcome::AlreadyConfigured;
        }

        if let Err(e) = config.validate() {
            log::warn!("Rejected setup input: {e}");
            return SetupOutcome::Invalid(e.into());
        }

        let probe = match (self.connect)(&config) {
            Ok(client) => validate_input(client.as_ref(), &config).await,
            Err(e) => Err(e),
        };

        if let Err(e) = probe {
            let error = SetupError::classify(&e);
            match error {
                SetupError::InvalidAuth => log::error!("Invalid authentication: {e}"),
                SetupError::CannotConnect => log::error!("Cannot connect: {e}"),
                _ => log::error!("Unexpected error during validation: {e}"),
            }
            return SetupOutcome::Invalid(error);
        }

        let entry = ConfigEntry::new(config);
        log::info!("Created entry {}", entry.entry_id);
        store.add(entry.clone());
        SetupOutcome::Created(entry)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
