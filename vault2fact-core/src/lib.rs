//! vault2fact Core Library
//!
//! This crate converts password-manager exports into factotum control
//! lines. It provides the per-record transformation (host extraction and
//! control-language quoting), the CSV importer, the conversion driver,
//! output sinks, and configuration.

pub mod config;
pub mod convert;
pub mod error;
pub mod factotum;
pub mod import;
pub mod logging;
pub mod models;
pub mod output;
pub mod progress;

pub use config::{ConfigManager, Settings};
pub use convert::{convert_record, ConversionSummary, Converter, SkippedEntry};
pub use error::{
    ConfigError, ConfigResult, ConvertError, ConvertResult, ImportError, ImportResult,
    OutputError, OutputResult,
};
pub use factotum::{compose, compose_line, encode, extract_host, quote, unquote, ComposeOptions};
pub use import::{BitwardenCsvImporter, ImportSource, RecordBatch};
pub use models::{ControlLine, CredentialRecord, RecordField, SkipReason};
pub use output::{ControlWriter, OutputTarget};
pub use progress::{ProgressReporter, TracingProgressReporter};
