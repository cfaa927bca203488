//! Application configuration

use anyhow::{bail, Context, Result};
use parkwatch_core::{
    ReadingMapper, DEFAULT_CLOCK_INTERVAL, DEFAULT_POLL_INTERVAL, DEFAULT_REMOTE_KEY,
    DEFAULT_SLOT_FIELDS,
};
use parkwatch_types::StoreConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_remote_key() -> String {
    DEFAULT_REMOTE_KEY.to_string()
}

fn default_slot_fields() -> Vec<String> {
    DEFAULT_SLOT_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_clock_interval() -> u64 {
    DEFAULT_CLOCK_INTERVAL.as_millis() as u64
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Where sensor readings are read from
    #[serde(default)]
    pub store: StoreConfig,
    /// Key of the node holding the sensor fields
    #[serde(default = "default_remote_key")]
    pub remote_key: String,
    /// Sensor field names in slot order; the length is the slot count
    #[serde(default = "default_slot_fields")]
    pub slot_fields: Vec<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Header clock refresh, independent of data polling
    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "parkwatch", "parkwatch")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.clock_interval_ms == 0 {
            bail!("clock_interval_ms must be greater than zero");
        }
        if self.remote_key.trim().is_empty() {
            bail!("remote_key must not be empty");
        }

        let mut seen = HashSet::new();
        for field in &self.slot_fields {
            if field.trim().is_empty() {
                bail!("slot_fields must not contain blank names");
            }
            if !seen.insert(field.as_str()) {
                bail!("slot field '{}' is listed more than once", field);
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    /// Reading mapper for the configured slot fields
    pub fn mapper(&self) -> ReadingMapper {
        ReadingMapper::new(self.slot_fields.iter().cloned())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            store: StoreConfig::default(),
            remote_key: default_remote_key(),
            slot_fields: default_slot_fields(),
            poll_interval_ms: default_poll_interval(),
            clock_interval_ms: default_clock_interval(),
            display: DisplayConfig::default(),
        }
    }
}

fn default_title() -> String {
    "Parking Slot Status".to_string()
}

fn default_footer() -> String {
    "© 2024 Smart Parking Sys. All Rights Reserved.".to_string()
}

/// Text shown around the slot board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_footer")]
    pub footer: String,
    /// Colour slot lines with ANSI escapes
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            footer: default_footer(),
            color: default_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_types::FixtureStoreConfig;

    #[test]
    fn test_defaults_match_reference_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.remote_key, "esp32-0DA710");
        assert_eq!(config.slot_fields, vec!["ir_sen1", "ir_sen2", "ir_sen3", "ir_sen4"]);
        assert_eq!(config.poll_interval(), Duration::from_millis(5000));
        assert_eq!(config.clock_interval(), Duration::from_millis(1000));
        assert_eq!(config.mapper().slot_count(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"store": {"store_type": "fixture", "path": "lot.json"}, "slot_fields": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(
            config.store,
            StoreConfig::Fixture(FixtureStoreConfig {
                path: PathBuf::from("lot.json")
            })
        );
        assert_eq!(config.slot_fields, vec!["a", "b"]);
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.display.title, "Parking Slot Status");
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = AppConfig::default();
        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.slot_fields = vec!["ir_sen1".to_string(), "ir_sen1".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));

        let mut config = AppConfig::default();
        config.slot_fields = vec![" ".to_string()];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.slot_fields.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_path() {
        let path = std::env::temp_dir()
            .join(format!("parkwatch-config-{}", std::process::id()))
            .join("config.json");
        let mut config = AppConfig::default();
        config.remote_key = "lot-b".to_string();

        config.save_to_path(&path).unwrap();
        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }
}
