use crate::error::{JotError, Result};
use crate::store::note_store::DEFAULT_SLOT_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for jotter, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JotterConfig {
    /// Name of the storage slot holding the notes document
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Ask before deleting a note
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,

    /// Level for the file log (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

fn default_confirm_delete() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            confirm_delete: default_confirm_delete(),
            log_level: default_log_level(),
        }
    }
}

/// Keys accepted by `jot config`.
pub const CONFIG_KEYS: [&str; 3] = ["storage-key", "confirm-delete", "log-level"];

impl JotterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JotError::Io)?;
        let config: JotterConfig =
            serde_json::from_str(&content).map_err(JotError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JotError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JotError::Serialization)?;
        fs::write(config_path, content).map_err(JotError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "storage-key" => Ok(self.storage_key.clone()),
            "confirm-delete" => Ok(self.confirm_delete.to_string()),
            "log-level" => Ok(self.log_level.clone()),
            other => Err(unknown_key(other)),
        }
    }

    /// Set a key from its textual form, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "storage-key" => {
                let valid = !value.is_empty()
                    && value
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
                if !valid {
                    return Err(JotError::Config(format!(
                        "storage-key must be letters, digits, '-' or '_', got '{}'",
                        value
                    )));
                }
                self.storage_key = value.to_string();
            }
            "confirm-delete" => {
                self.confirm_delete = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(JotError::Config(format!(
                            "confirm-delete must be true or false, got '{}'",
                            other
                        )))
                    }
                };
            }
            "log-level" => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(JotError::Config(format!(
                        "log-level must be one of {}, got '{}'",
                        LOG_LEVELS.join("|"),
                        value
                    )));
                }
                self.log_level = level;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|v| (*key, v)))
            .collect()
    }
}

fn unknown_key(key: &str) -> JotError {
    JotError::Config(format!(
        "Unknown config key '{}': expected one of {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
