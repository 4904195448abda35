//! Error types for vault2fact
//!
//! This module defines the error types used throughout the converter,
//! providing descriptive messages for configuration, import, output, and
//! conversion failures. Records that are merely unusable are not errors;
//! they are reported as [`crate::models::SkipReason`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration file operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),
}

/// Errors related to reading a password-manager export
#[derive(Debug, Error)]
pub enum ImportError {
    /// Import source file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The header lacks one or more required columns
    #[error("Missing expected columns: {}", missing.join(", "))]
    MissingColumns {
        /// Names of the columns that were not found
        missing: Vec<String>,
    },

    /// A row could not be parsed
    #[error("Failed to parse row {row}: {reason}")]
    ParseError {
        /// 1-based data row (0 for the header)
        row: usize,
        /// The reason for parse failure
        reason: String,
    },

    /// I/O error during import
    #[error("IO error during import: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the output sink
#[derive(Debug, Error)]
pub enum OutputError {
    /// The sink could not be opened
    #[error("Failed to open {}: {reason}", path.display())]
    Open {
        /// Path of the sink
        path: PathBuf,
        /// The underlying reason
        reason: String,
    },

    /// Writing a control line failed
    #[error("Failed to write output: {0}")]
    Write(String),

    /// I/O error on the sink
    #[error("IO error on output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a conversion run
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Writing to the sink failed
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The run was cancelled through its progress reporter
    #[error("Conversion cancelled")]
    Cancelled,
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for import operations
pub type ImportResult<T> = std::result::Result<T, ImportError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Result type alias for conversion runs
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
