//! Application configuration management.
//!
//! Configuration is stored at `~/.config/shorebook/config.json`. Every
//! field is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/log directory paths
const APP_NAME: &str = "shorebook";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to a room catalog JSON file. Falls back to the embedded catalog.
    pub catalog_path: Option<PathBuf>,
    /// Override for the simulated booking latency, in milliseconds.
    pub booking_latency_ms: Option<u64>,
    /// Override for how long toasts stay on screen, in milliseconds.
    pub toast_duration_ms: Option<u64>,
}

impl Config {
    /// Load the config. On first run the file does not exist yet; the
    /// defaults are written out so there is a file to edit.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Self::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the application log file.
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            catalog_path: Some(PathBuf::from("/tmp/rooms.json")),
            booking_latency_ms: Some(250),
            toast_duration_ms: None,
        };
        config.save_to(&path).unwrap();

        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.catalog_path, config.catalog_path);
        assert_eq!(back.booking_latency_ms, Some(250));
        assert_eq!(back.toast_duration_ms, None);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        Config::default().save_to(&path).unwrap();

        let back = Config::load_from(&path).unwrap();
        assert!(back.catalog_path.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let back: Config = serde_json::from_str("{}").unwrap();
        assert!(back.catalog_path.is_none());
        assert!(back.booking_latency_ms.is_none());
    }
}
