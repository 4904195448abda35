//! Configuration manager for TOML file operations
//!
//! This module provides the `ConfigManager` which loads, validates and
//! saves the vault2fact settings file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

use super::settings::Settings;

/// File name of the settings file inside the configuration directory
const CONFIG_FILE: &str = "config.toml";

/// Configuration manager for vault2fact
///
/// Settings live in `~/.config/vault2fact/config.toml` by default, or in an
/// explicit file given on the command line.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Path of the settings file
    config_path: PathBuf,
    /// Whether the file was named explicitly and must exist
    explicit: bool,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` with the default configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join("vault2fact");
        Ok(Self::with_config_dir(&config_dir))
    }

    /// Creates a `ConfigManager` reading `config.toml` from `config_dir`
    #[must_use]
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            config_path: config_dir.join(CONFIG_FILE),
            explicit: false,
        }
    }

    /// Creates a `ConfigManager` for an explicit settings file
    ///
    /// Unlike the default location, an explicit file must exist.
    #[must_use]
    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            explicit: true,
        }
    }

    /// Returns the settings file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads and validates settings
    ///
    /// Returns default settings if the default file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if the file
    /// exists but cannot be parsed or fails validation.
    pub fn load_settings(&self) -> ConfigResult<Settings> {
        if !self.config_path.exists() {
            if self.explicit {
                return Err(ConfigError::NotFound(self.config_path.clone()));
            }
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            ConfigError::Parse(format!(
                "Failed to read {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            ConfigError::Deserialize(format!(
                "Failed to parse {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        Self::validate_settings(&settings)?;
        Ok(settings)
    }

    /// Saves settings, creating the parent directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_settings(&self, settings: &Settings) -> ConfigResult<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Write(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = toml::to_string_pretty(settings)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))?;

        fs::write(&self.config_path, content).map_err(|e| {
            ConfigError::Write(format!(
                "Failed to write {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Validates settings
    ///
    /// # Errors
    ///
    /// Returns an error if a column name is empty or two columns share a name.
    pub fn validate_settings(settings: &Settings) -> ConfigResult<()> {
        let import = &settings.import;
        let named = [
            ("import.uri_column", import.uri_column.as_str()),
            ("import.username_column", import.username_column.as_str()),
            ("import.password_column", import.password_column.as_str()),
        ];

        for (field, name) in named {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    reason: "Column name cannot be empty".to_string(),
                });
            }
        }

        for (i, (field, name)) in named.iter().enumerate() {
            if named[..i].iter().any(|(_, other)| other == name) {
                return Err(ConfigError::Validation {
                    field: (*field).to_string(),
                    reason: format!("Column '{name}' is already used by another field"),
                });
            }
        }

        if settings.output.mount.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "output.mount".to_string(),
                reason: "Mountpoint cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
