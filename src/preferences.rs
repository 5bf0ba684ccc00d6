//! Durable display preferences.
//!
//! Preferences live in a small TOML table of string values next to the config
//! file. Only the dark-mode flag is stored today, as `"true"` or `"false"`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::config::paths::get_preferences_path;
use crate::constants::preferences::DARK_MODE_KEY;
use crate::error::AppError;

type PreferenceTable = BTreeMap<String, String>;

/// String key-value store backed by one TOML file
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory
    pub fn default_location() -> Self {
        Self::new(get_preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted dark-mode flag; absent, unreadable or unrecognised values
    /// mean light mode.
    pub async fn load(&self) -> bool {
        match self.get(DARK_MODE_KEY).await {
            Ok(Some(value)) => value == "true",
            Ok(None) => false,
            Err(e) => {
                warn!("Could not read preferences from {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Persists the dark-mode flag, keeping any other stored keys
    pub async fn save(&self, dark_mode: bool) -> Result<(), AppError> {
        self.set(DARK_MODE_KEY, if dark_mode { "true" } else { "false" })
            .await?;
        debug!("Saved dark mode = {}", dark_mode);
        Ok(())
    }

    /// Value stored under `key`
    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_table().await?.remove(key))
    }

    /// Stores `value` under `key`
    pub async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        // A corrupt file is replaced rather than blocking every later save
        let mut table = self.read_table().await.unwrap_or_default();
        table.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string(&table)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }

    async fn read_table(&self) -> Result<PreferenceTable, AppError> {
        if !self.path.exists() {
            return Ok(PreferenceTable::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_defaults_to_light_mode() {
        let temp_dir = tempdir().unwrap();
        let store = PreferenceStore::new(temp_dir.path().join("preferences.toml"));
        assert!(!store.load().await);
    }

    #[tokio::test]
    async fn test_toggle_persists_across_instances() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.toml");

        PreferenceStore::new(&path).save(true).await.unwrap();
        assert!(PreferenceStore::new(&path).load().await);

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("darkMode = \"true\""), "{content}");

        PreferenceStore::new(&path).save(false).await.unwrap();
        assert!(!PreferenceStore::new(&path).load().await);
    }

    #[tokio::test]
    async fn test_other_keys_survive_save() {
        let temp_dir = tempdir().unwrap();
        let store = PreferenceStore::new(temp_dir.path().join("preferences.toml"));

        store.set("lastMonth", "2024-02").await.unwrap();
        store.save(true).await.unwrap();

        assert_eq!(
            store.get("lastMonth").await.unwrap().as_deref(),
            Some("2024-02")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_light_and_is_repaired() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        tokio::fs::write(&path, "darkMode = [").await.unwrap();

        let store = PreferenceStore::new(&path);
        assert!(!store.load().await);

        store.save(true).await.unwrap();
        assert!(store.load().await);
    }

    #[tokio::test]
    async fn test_unrecognised_value_is_light() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        tokio::fs::write(&path, "darkMode = \"yes\"\n").await.unwrap();
        assert!(!PreferenceStore::new(&path).load().await);
    }
}
