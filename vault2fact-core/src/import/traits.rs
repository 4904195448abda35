//! Import source trait and record batch type.
//!
//! This module defines the abstraction every export reader implements, so
//! the converter never depends on a particular file format.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::models::CredentialRecord;

/// Records read from one export, in file order.
#[derive(Debug, Default)]
pub struct RecordBatch {
    /// Records in the order they appear in the source
    pub records: Vec<CredentialRecord>,
    /// Where the records came from (file path or "stdin")
    pub source: Option<String>,
}

impl RecordBatch {
    /// Creates a new empty batch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source description
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the batch holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a record to the batch
    pub fn push(&mut self, record: CredentialRecord) {
        self.records.push(record);
    }
}

/// Trait for export readers.
pub trait ImportSource: Send + Sync {
    /// Returns the unique identifier for this import source
    fn source_id(&self) -> &'static str;

    /// Reads every record from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or lacks required columns.
    /// A single unparsable row aborts the whole import.
    fn import_from_reader(&self, reader: &mut dyn Read) -> ImportResult<RecordBatch>;

    /// Reads every record from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::FileNotFound` if `path` does not exist, or any
    /// error from [`ImportSource::import_from_reader`].
    fn import_from_path(&self, path: &Path) -> ImportResult<RecordBatch> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.to_path_buf()));
        }
        let mut file = File::open(path)?;
        let batch = self.import_from_reader(&mut file)?;
        Ok(batch.with_source(path.display().to_string()))
    }
}
