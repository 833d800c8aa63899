//! Configuration module for the Voxtral speech-to-text bridge.
//!
//! Provides the integration constants, the per-entry settings
//! (`ProviderConfig` + `EntryOptions` wrapped in a `ConfigEntry`), `AppPaths`
//! for cross-platform data directories, and TOML persistence of all configured
//! entries via [`EntryStore`].

pub mod constants;
pub mod paths;
pub mod settings;
pub mod store;

pub use constants::{
    is_supported_language, language_in, DEFAULT_API_URL, DEFAULT_STT_MODEL, DEFAULT_TEMPERATURE, DOMAIN,
    SUPPORTED_LANGUAGES, SUPPORTED_MODELS,
};
pub use paths::AppPaths;
pub use settings::{ConfigEntry, ConfigError, EntryOptions, ProviderConfig};
pub use store::EntryStore;
