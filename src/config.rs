//! Persisted application configuration
//!
//! Settings live in a TOML file (destination folder paths, last opened
//! directory, supported extensions, icon size, window title/geometry).
//! A legacy INI file from older releases is imported once when no TOML
//! file exists yet.

use crate::error::{PicsortError, Result};
use crate::grouping::SLOT_COUNT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "config.toml";
const LEGACY_CONFIG_FILE: &str = "config.ini";

const FILE_HEADER: &str = "# picsort configuration\n\
                           # Edit by hand or let the application rewrite it on save.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub folders: FoldersConfig,
    pub viewer: ViewerConfig,
    pub images: ImagesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folders: FoldersConfig::default(),
            viewer: ViewerConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

/// Destination folder assignments and their on-screen icon size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldersConfig {
    /// One path per destination slot; an empty string means unset
    pub paths: Vec<String>,
    pub icon_size: [u32; 2],
}

impl Default for FoldersConfig {
    fn default() -> Self {
        Self {
            paths: vec![String::new(); SLOT_COUNT],
            icon_size: [64, 64],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub default_geometry: String,
    /// Folder reopened on startup; empty string when unset
    pub last_opened_directory: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Picsort".to_string(),
            default_geometry: "800x600".to_string(),
            last_opened_directory: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Lower-cased, dot-prefixed extensions accepted by the catalog scan
    pub supported_extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            supported_extensions: [".jpg", ".jpeg", ".png", ".gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Converts Windows-style backslashes to forward slashes so path strings
/// round-trip cleanly through the TOML file.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn normalize_config(config: &mut Config) {
    for path in &mut config.folders.paths {
        *path = normalize_path(path);
    }
    config.viewer.last_opened_directory = normalize_path(&config.viewer.last_opened_directory);
    // Keep exactly one path string per slot
    config.folders.paths.resize(SLOT_COUNT, String::new());
}

/// Reads and writes the configuration file, caching the loaded value.
///
/// Constructed once at startup and passed to the components that need it;
/// there is no process-wide configuration state.
#[derive(Debug)]
pub struct ConfigStore {
    config_path: PathBuf,
    legacy_path: PathBuf,
    cache: Option<Config>,
}

impl ConfigStore {
    /// Store rooted at the platform config directory (~/.config/picsort)
    pub fn open_default() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| {
                PicsortError::Config("could not determine config directory".to_string())
            })?
            .join("picsort");
        Ok(Self::at(dir.join(CONFIG_FILE)))
    }

    /// Store at an explicit file path; the legacy file is looked up alongside it
    pub fn at(config_path: PathBuf) -> Self {
        let legacy_path = config_path
            .parent()
            .map(|dir| dir.join(LEGACY_CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(LEGACY_CONFIG_FILE));
        Self {
            config_path,
            legacy_path,
            cache: None,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the configuration, reading from disk once and caching it.
    ///
    /// A missing or unparseable file falls back to defaults; startup never
    /// fails on account of the configuration. The file is (re)written after
    /// the first load so a fresh install ends up with a complete file.
    pub fn load(&mut self) -> &Config {
        if self.cache.is_none() {
            let mut config = self.read_from_disk();
            normalize_config(&mut config);
            if let Err(e) = self.write_file(&config) {
                warn!("could not write configuration file: {e}");
            }
            self.cache = Some(config);
        }
        self.cache.as_ref().expect("cache populated above")
    }

    /// Persists the configuration and updates the cache.
    pub fn save(&mut self, mut config: Config) -> Result<()> {
        normalize_config(&mut config);
        self.write_file(&config)?;
        self.cache = Some(config);
        Ok(())
    }

    fn read_from_disk(&self) -> Config {
        if self.config_path.exists() {
            match fs::read_to_string(&self.config_path) {
                Ok(text) => match toml::from_str(&text) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("unparseable {CONFIG_FILE}, recreating with defaults: {e}");
                        Config::default()
                    }
                },
                Err(e) => {
                    warn!("could not read {CONFIG_FILE}, using defaults: {e}");
                    Config::default()
                }
            }
        } else if self.legacy_path.exists() {
            self.import_legacy()
        } else {
            Config::default()
        }
    }

    /// One-time import of folder paths from the legacy INI format.
    fn import_legacy(&self) -> Config {
        let mut config = Config::default();
        let Ok(text) = fs::read_to_string(&self.legacy_path) else {
            return config;
        };

        let mut in_folders = false;
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if line.starts_with('[') {
                in_folders = line.eq_ignore_ascii_case("[folders]");
                continue;
            }
            if !in_folders {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if key.starts_with("folder") {
                    entries.push((key.to_string(), normalize_path(value.trim())));
                }
            }
        }

        // Keys are folder0, folder1, ... ; sort to restore slot order
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (slot, (_, path)) in entries.into_iter().take(SLOT_COUNT).enumerate() {
            config.folders.paths[slot] = path;
        }
        config
    }

    fn write_file(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(config)
            .map_err(|e| PicsortError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(&self.config_path, format!("{FILE_HEADER}{body}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join(CONFIG_FILE))
    }

    #[test]
    fn test_first_load_writes_default_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let config = store.load().clone();
        assert_eq!(config, Config::default());
        assert_eq!(config.viewer.last_opened_directory, "");
        assert_eq!(config.folders.paths.len(), SLOT_COUNT);

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert!(written.contains("supported_extensions"));
        assert!(written.contains("last_opened_directory"));
    }

    #[test]
    fn test_save_and_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let mut config = store.load().clone();
        config.folders.paths[1] = "/tmp/keepers".to_string();
        config.viewer.last_opened_directory = "/tmp/inbox".to_string();
        config.images.supported_extensions.push(".webp".to_string());
        store.save(config.clone()).unwrap();

        let mut reopened = store_in(&dir);
        assert_eq!(*reopened.load(), config);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "this is { not toml").unwrap();

        let mut store = store_in(&dir);
        assert_eq!(*store.load(), Config::default());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[viewer]\ntitle = \"custom\"\n",
        )
        .unwrap();

        let mut store = store_in(&dir);
        let config = store.load();
        assert_eq!(config.viewer.title, "custom");
        assert_eq!(config.viewer.default_geometry, "800x600");
        assert_eq!(config.images, ImagesConfig::default());
    }

    #[test]
    fn test_legacy_ini_is_imported_once() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(LEGACY_CONFIG_FILE),
            "[folders]\nfolder1 = C:\\photos\\cats\nfolder0 = /srv/dogs\nfolder2 =\nfolder3 =\n",
        )
        .unwrap();

        let mut store = store_in(&dir);
        let config = store.load();
        assert_eq!(config.folders.paths[0], "/srv/dogs");
        assert_eq!(config.folders.paths[1], "C:/photos/cats");
        assert_eq!(config.folders.paths[2], "");

        // The TOML file now exists; the legacy file is no longer consulted
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_save_normalizes_path_separators() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let mut config = store.load().clone();
        config.folders.paths[0] = "C:\\photos\\best".to_string();
        config.viewer.last_opened_directory = "D:\\inbox".to_string();
        store.save(config).unwrap();

        let mut reopened = store_in(&dir);
        let config = reopened.load();
        assert_eq!(config.folders.paths[0], "C:/photos/best");
        assert_eq!(config.viewer.last_opened_directory, "D:/inbox");
    }
}
