use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const API_KEY_ENV: &str = "GRIST_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("No API key configured (set store.api_key or GRIST_API_KEY)")]
    MissingCredential,
    #[error("No store base_url configured")]
    MissingBaseUrl,
    #[error("Invalid slot range: {min}h to {max}h")]
    InvalidSlotRange { min: u32, max: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Document root, e.g. `https://api.getgrist.com/api/docs/<doc id>`.
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TablesConfig {
    pub teams: String,
    pub reservations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub slot_min_hour: u32,
    pub slot_max_hour: u32,
    pub show_weekends: bool,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            teams: "EQUIPES".to_string(),
            reservations: "RESERVATIONS".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slot_min_hour: 8,
            slot_max_hour: 19,
            show_weekends: false,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grist-calendar")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.store.api_key = key;
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.store.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        if self.ui.slot_min_hour >= self.ui.slot_max_hour || self.ui.slot_max_hour > 24 {
            return Err(ConfigError::InvalidSlotRange {
                min: self.ui.slot_min_hour,
                max: self.ui.slot_max_hour,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            tables: TablesConfig::default(),
            ui: UiConfig::default(),
        }
    }
}
