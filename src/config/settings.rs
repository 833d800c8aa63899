//! Per-entry settings structs, defaults and validation.
//!
//! A configured integration is one [`ConfigEntry`]: the immutable
//! [`ProviderConfig`] captured at setup time plus the editable
//! [`EntryOptions`].  All structs implement `Serialize`, `Deserialize` and
//! `Clone` so they can be round-tripped through TOML and shared read-only
//! across requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::constants::{DEFAULT_API_URL, DEFAULT_STT_MODEL, DEFAULT_TEMPERATURE, DOMAIN};

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Rejections raised while validating user-supplied settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The API key is missing or blank.
    #[error("an API key is required")]
    MissingApiKey,

    /// The base URL is not an absolute `http`/`https` URL.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The model identifier is blank.
    #[error("model identifier must not be empty")]
    EmptyModel,

    /// Temperature outside the closed range `[0, 1]`.
    #[error("temperature must be within 0.0..=1.0, got {0}")]
    TemperatureOutOfRange(f32),
}

// ---------------------------------------------------------------------------
// ProviderConfig
// ---------------------------------------------------------------------------

/// Connection settings supplied once at setup.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Server URL without the `/v1/...` path, e.g. `https://api.mistral.ai`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier probed during setup and used for transcription.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_model() -> String {
    DEFAULT_STT_MODEL.into()
}

impl ProviderConfig {
    /// Build a config, filling `base_url` and `model` with their defaults when
    /// omitted or blank.
    pub fn new(api_key: impl Into<String>, base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(default_base_url);
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(default_model);

        Self {
            api_key: api_key.into(),
            base_url,
            model,
        }
    }

    /// Check the settings before any network call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme",
                self.base_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        Ok(())
    }

    /// `base_url` with any trailing slashes removed, ready for path joining.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Two configs describe the same integration when key, server and model
    /// all match (trailing slashes on the URL are not significant).
    pub fn matches(&self, other: &ProviderConfig) -> bool {
        self.api_key == other.api_key
            && self.api_root() == other.api_root()
            && self.model == other.model
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(String::new(), None, None)
    }
}

// The API key must never reach logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// EntryOptions
// ---------------------------------------------------------------------------

/// Options that may be changed after setup without re-validating credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryOptions {
    /// Overrides [`ProviderConfig::model`] for transcription requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Sampling temperature (0.0 – 1.0).  `None` means [`DEFAULT_TEMPERATURE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Language used when the host does not supply one with the audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl EntryOptions {
    /// Reject a temperature outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.temperature {
            Some(t) if !(0.0..=1.0).contains(&t) => Err(ConfigError::TemperatureOutOfRange(t)),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigEntry
// ---------------------------------------------------------------------------

/// One configured integration instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Stable identifier, also used as the provider's unique id.
    pub entry_id: String,
    /// Display name of the provider.
    pub title: String,
    /// Validated connection settings.
    pub data: ProviderConfig,
    /// Post-setup options.
    #[serde(default)]
    pub options: EntryOptions,
}

impl ConfigEntry {
    /// Create an entry with a fresh identifier and the integration domain as title.
    pub fn new(data: ProviderConfig) -> Self {
        Self {
            entry_id: Uuid::new_v4().simple().to_string(),
            title: DOMAIN.into(),
            data,
            options: EntryOptions::default(),
        }
    }

    /// Model sent with transcription requests: options, then data, then default.
    pub fn effective_model(&self) -> &str {
        self.options
            .model
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(Some(self.data.model.as_str()).filter(|m| !m.is_empty()))
            .unwrap_or(DEFAULT_STT_MODEL)
    }

    /// Temperature sent with transcription requests.
    pub fn effective_temperature(&self) -> f32 {
        self.options.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let cfg = ProviderConfig::new("key", None, None);
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.model, DEFAULT_STT_MODEL);

        let blank = ProviderConfig::new("key", Some("  ".into()), Some(String::new()));
        assert_eq!(blank.base_url, DEFAULT_API_URL);
        assert_eq!(blank.model, DEFAULT_STT_MODEL);
    }

    #[test]
    fn validate_rejects_blank_key() {
        let cfg = ProviderConfig::new("   ", None, None);
        assert_eq!(cfg.validate(), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn validate_rejects_bad_url() {
        let cfg = ProviderConfig::new("key", Some("not a url".into()), None);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidUrl(_))));

        let ftp = ProviderConfig::new("key", Some("ftp://example.com".into()), None);
        assert!(matches!(ftp.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(ProviderConfig::new("key", None, None).validate().is_ok());
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = ProviderConfig::new("sk-secret-value", None, None);
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-secret-value"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn matches_ignores_trailing_slash() {
        let a = ProviderConfig::new("k", Some("https://api.mistral.ai/".into()), None);
        let b = ProviderConfig::new("k", None, None);
        assert!(a.matches(&b));

        let c = ProviderConfig::new("other", None, None);
        assert!(!a.matches(&c));
    }

    #[test]
    fn temperature_range_is_enforced() {
        let mut opts = EntryOptions::default();
        assert!(opts.validate().is_ok());

        opts.temperature = Some(1.0);
        assert!(opts.validate().is_ok());

        opts.temperature = Some(1.5);
        assert_eq!(
            opts.validate(),
            Err(ConfigError::TemperatureOutOfRange(1.5))
        );

        opts.temperature = Some(-0.1);
        assert!(opts.validate().is_err());
    }

    #[test]
    fn effective_model_prefers_options() {
        let mut entry = ConfigEntry::new(ProviderConfig::new("k", None, Some("voxtral-mini-2507".into())));
        assert_eq!(entry.effective_model(), "voxtral-mini-2507");

        entry.options.model = Some("custom-model".into());
        assert_eq!(entry.effective_model(), "custom-model");

        entry.options.model = None;
        entry.data.model = String::new();
        assert_eq!(entry.effective_model(), DEFAULT_STT_MODEL);
    }

    #[test]
    fn new_entries_get_distinct_ids() {
        let a = ConfigEntry::new(ProviderConfig::new("k", None, None));
        let b = ConfigEntry::new(ProviderConfig::new("k", None, None));
        assert_ne!(a.entry_id, b.entry_id);
        assert_eq!(a.title, DOMAIN);
        assert_eq!(a.effective_temperature(), DEFAULT_TEMPERATURE);
    }
}
