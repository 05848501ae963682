use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::summary::DEFAULT_PREVIEW_LIMIT;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_path: String,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: String::new(),
            user_name: default_user_name(),
            city: default_city(),
            preview_limit: default_preview_limit(),
            log_level: default_log_level(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

// Default value functions
fn default_user_name() -> String {
    "User".to_string()
}

fn default_city() -> String {
    "Toronto".to_string()
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from `path`, writing defaults there if it does not exist.
    /// An empty database path is filled in from the profile.
    pub fn load_from_path(path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents =
                fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
            toml::from_str::<Config>(&contents)?
        } else {
            let mut config = Config::default();
            config.database_path = Self::default_database_path_for_profile(profile);
            config.save_to_path(path)?;
            config
        };

        if config.database_path.trim().is_empty() {
            config.database_path = Self::default_database_path_for_profile(profile);
        }

        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get default database path for a specific profile
    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("wellday.db").to_string_lossy().to_string()
        } else {
            format!("~/.local/share/{}/wellday.db", profile.app_name())
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Change the name used on the home view. Blank names are ignored.
    pub fn set_user_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.user_name = name.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Profile;

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = toml::from_str("user_name = \"Ana\"\n").unwrap();
        assert_eq!(config.user_name, "Ana");
        assert_eq!(config.city, "Toronto");
        assert_eq!(config.preview_limit, 3);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.config_version, Some(CURRENT_CONFIG_VERSION));
    }

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let config = Config::load_from_path(&path, Profile::Dev).unwrap();
        assert!(path.exists());
        assert!(!config.database_path.is_empty());
        assert_eq!(config.user_name, "User");

        let again = Config::load_from_path(&path, Profile::Dev).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn saved_changes_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load_from_path(&path, Profile::Dev).unwrap();
        assert!(config.set_user_name("  Robin "));
        assert!(!config.set_user_name("   "));
        config.database_path = "/tmp/elsewhere.db".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path, Profile::Dev).unwrap();
        assert_eq!(loaded.user_name, "Robin");
        assert_eq!(loaded.get_database_path(), PathBuf::from("/tmp/elsewhere.db"));
    }

    #[test]
    fn broken_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "user_name = [").unwrap();
        assert!(matches!(
            Config::load_from_path(&path, Profile::Dev),
            Err(ConfigError::ParseError(_))
        ));
    }
}
