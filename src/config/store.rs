//! TOML persistence of configured entries.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::settings::{ConfigEntry, ProviderConfig};
use super::AppPaths;

// ---------------------------------------------------------------------------
// EntryStore
// ---------------------------------------------------------------------------

/// Every configured entry, serialised as `entries.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voxtral_stt::config::EntryStore;
///
/// // Load (returns an empty store when the file is missing)
/// let store = EntryStore::load().unwrap();
/// println!("{} entries configured", store.len());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryStore {
    #[serde(default, rename = "entry")]
    entries: Vec<ConfigEntry>,
}

impl EntryStore {
    /// Load entries from the platform-appropriate `entries.toml`.
    ///
    /// Returns an empty store when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().entries_file)
    }

    /// Load from an explicit path (useful for tests).
    ///
    /// Fails when any entry carries options outside their valid range.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let store: Self = toml::from_str(&content)?;
        for entry in &store.entries {
            entry
                .options
                .validate()
                .with_context(|| format!("entry {} in {}", entry.entry_id, path.display()))?;
        }
        Ok(store)
    }

    /// Save entries to the platform-appropriate `entries.toml`, creating
    /// parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().entries_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id.
    pub fn get(&self, entry_id: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.entry_id == entry_id)
    }

    /// First entry whose connection settings match `data`.
    pub fn find_matching(&self, data: &ProviderConfig) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.data.matches(data))
    }

    /// Append an entry.  Duplicate detection is the caller's job.
    pub fn add(&mut self, entry: ConfigEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the entry with `entry_id`, if present.
    pub fn remove(&mut self, entry_id: &str) -> Option<ConfigEntry> {
        let idx = self.entries.iter().position(|e| e.entry_id == entry_id)?;
        Some(self.entries.remove(idx))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use tempfile::tempdir;

    fn entry(key: &str) -> ConfigEntry {
        ConfigEntry::new(ProviderConfig::new(key, None, None))
    }

    #[test]
    fn load_missing_returns_empty() {
        let dir = tempdir().expect("temp dir");
        let store = EntryStore::load_from(&dir.path().join("nope.toml")).expect("load");
        assert!(store.is_empty());
    }

    /// Entries survive a save/load cycle, options included.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("entries.toml");

        let mut store = EntryStore::default();
        let mut first = entry("key-1");
        first.options.temperature = Some(0.2);
        first.options.language = Some("fr".into());
        store.add(first.clone());
        store.add(entry("key-2"));
        store.save_to(&path).expect("save");

        let loaded = EntryStore::load_from(&path).expect("load");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.entries()[0], first);
        assert_eq!(loaded.entries()[1].data.api_key, "key-2");
    }

    #[test]
    fn out_of_range_temperature_fails_to_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("entries.toml");

        let mut store = EntryStore::default();
        let mut hot = entry("key");
        hot.options.temperature = Some(7.5);
        store.add(hot);
        store.save_to(&path).expect("save");

        let err = EntryStore::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::TemperatureOutOfRange(t)) if *t == 7.5
        ));
    }

    #[test]
    fn find_matching_detects_duplicates() {
        let mut store = EntryStore::default();
        store.add(entry("key-1"));

        assert!(store
            .find_matching(&ProviderConfig::new("key-1", None, None))
            .is_some());
        assert!(store
            .find_matching(&ProviderConfig::new("key-1", None, Some("voxtral-mini-2507".into())))
            .is_none());
    }

    #[test]
    fn remove_by_id() {
        let mut store = EntryStore::default();
        let e = entry("key-1");
        let id = e.entry_id.clone();
        store.add(e);

        assert!(store.get(&id).is_some());
        assert_eq!(store.remove(&id).map(|e| e.entry_id), Some(id.clone()));
        assert!(store.get(&id).is_none());
        assert!(store.remove(&id).is_none());
    }
}
