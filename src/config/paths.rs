//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (configured entries):
//!   Windows: %APPDATA%\voxtral-stt\
//!   macOS:   ~/Library/Application Support/voxtral-stt/
//!   Linux:   ~/.config/voxtral-stt/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `entries.toml`.
    pub config_dir: PathBuf,
    /// Full path to `entries.toml`.
    pub entries_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voxtral-stt";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let entries_file = config_dir.join("entries.toml");

        Self {
            config_dir,
            entries_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
