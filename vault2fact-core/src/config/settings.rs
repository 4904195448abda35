//! Application settings model
//!
//! This module defines the settings stored in config.toml.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// CSV import settings
    #[serde(default)]
    pub import: ImportSettings,
    /// Output sink settings
    #[serde(default)]
    pub output: OutputSettings,
    /// Control-line encoding settings
    #[serde(default)]
    pub encoding: EncodingSettings,
}

/// Column names resolved in the CSV header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Column holding the login URI
    #[serde(default = "default_uri_column")]
    pub uri_column: String,
    /// Column holding the login username
    #[serde(default = "default_username_column")]
    pub username_column: String,
    /// Column holding the login password
    #[serde(default = "default_password_column")]
    pub password_column: String,
}

fn default_uri_column() -> String {
    "login_uri".to_string()
}

fn default_username_column() -> String {
    "login_username".to_string()
}

fn default_password_column() -> String {
    "login_password".to_string()
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            uri_column: default_uri_column(),
            username_column: default_username_column(),
            password_column: default_password_column(),
        }
    }
}

impl ImportSettings {
    /// Returns the column names in uri, username, password order
    #[must_use]
    pub fn columns(&self) -> [&str; 3] {
        [
            self.uri_column.as_str(),
            self.username_column.as_str(),
            self.password_column.as_str(),
        ]
    }
}

/// Output sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Factotum mountpoint used with `--apply` (`~` is expanded)
    #[serde(default = "default_mount")]
    pub mount: PathBuf,
}

fn default_mount() -> PathBuf {
    PathBuf::from("/mnt/factotum")
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            mount: default_mount(),
        }
    }
}

impl OutputSettings {
    /// Returns the mountpoint with a leading `~` expanded
    #[must_use]
    pub fn expanded_mount(&self) -> PathBuf {
        let raw = self.mount.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&raw).into_owned())
    }
}

/// Control-line encoding settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Quote every password, even safe bare tokens
    #[serde(default)]
    pub always_quote_password: bool,
}
