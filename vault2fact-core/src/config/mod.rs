//! Configuration management for vault2fact
//!
//! This module provides the `ConfigManager` for loading and saving the
//! settings file in TOML format.

mod manager;
pub mod settings;

pub use manager::ConfigManager;
pub use settings::{EncodingSettings, ImportSettings, OutputSettings, Settings};
