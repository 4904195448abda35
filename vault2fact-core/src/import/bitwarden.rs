//! Bitwarden CSV export importer.
//!
//! Reads the CSV produced by "Export vault" in Bitwarden. Columns are
//! located by header name, so the column order and any extra columns
//! (`folder`, `favorite`, `notes`, `login_totp`, ...) do not matter.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info_span};

use crate::config::ImportSettings;
use crate::error::{ImportError, ImportResult};
use crate::logging::span_names;
use crate::models::CredentialRecord;

use super::traits::{ImportSource, RecordBatch};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Positions of the required columns in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    /// Index of the URI column
    pub uri: usize,
    /// Index of the username column
    pub username: usize,
    /// Index of the password column
    pub password: usize,
}

impl ColumnIndices {
    /// Resolves the configured column names against a header row.
    ///
    /// The first column with a matching name wins.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MissingColumns` naming every absent column.
    pub fn resolve(headers: &StringRecord, columns: &ImportSettings) -> ImportResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches(BYTE_ORDER_MARK) == name)
        };

        let [uri_name, username_name, password_name] = columns.columns();
        match (find(uri_name), find(username_name), find(password_name)) {
            (Some(uri), Some(username), Some(password)) => Ok(Self {
                uri,
                username,
                password,
            }),
            (uri, username, password) => {
                let missing = [
                    (uri, uri_name),
                    (username, username_name),
                    (password, password_name),
                ]
                .into_iter()
                .filter(|(index, _)| index.is_none())
                .map(|(_, name)| name.to_string())
                .collect();
                Err(ImportError::MissingColumns { missing })
            }
        }
    }

    /// Extracts a record from a data row.
    fn record(&self, row: &StringRecord, row_number: usize) -> ImportResult<CredentialRecord> {
        let field = |index: usize| {
            row.get(index).ok_or_else(|| ImportError::ParseError {
                row: row_number,
                reason: format!("missing field {}", index + 1),
            })
        };

        Ok(
            CredentialRecord::new(field(self.uri)?, field(self.username)?, field(self.password)?)
                .with_row(row_number),
        )
    }
}

/// Importer for Bitwarden CSV exports.
#[derive(Debug, Clone, Default)]
pub struct BitwardenCsvImporter {
    columns: ImportSettings,
}

impl BitwardenCsvImporter {
    /// Creates an importer using the standard Bitwarden column names
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an importer with custom column names
    #[must_use]
    pub const fn with_columns(columns: ImportSettings) -> Self {
        Self { columns }
    }

    /// Returns the column names this importer looks for
    #[must_use]
    pub const fn columns(&self) -> &ImportSettings {
        &self.columns
    }

    /// Parses CSV content held in memory
    ///
    /// # Errors
    ///
    /// Same as [`ImportSource::import_from_reader`].
    pub fn import_from_content(&self, content: &str) -> ImportResult<RecordBatch> {
        self.import_from_reader(&mut content.as_bytes())
    }
}

impl ImportSource for BitwardenCsvImporter {
    fn source_id(&self) -> &'static str {
        "bitwarden_csv"
    }

    fn import_from_reader(&self, reader: &mut dyn Read) -> ImportResult<RecordBatch> {
        let _span = info_span!(span_names::IMPORT_READ, source = self.source_id()).entered();

        let mut csv = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = csv.headers().map_err(|e| ImportError::ParseError {
            row: 0,
            reason: format!("Error reading header: {e}"),
        })?;
        let indices = ColumnIndices::resolve(headers, &self.columns)?;
        debug!(?indices, "Resolved export columns");

        let mut batch = RecordBatch::new();
        let mut row = StringRecord::new();
        let mut row_number = 0;
        loop {
            row_number += 1;
            let more = csv.read_record(&mut row).map_err(|e| ImportError::ParseError {
                row: row_number,
                reason: e.to_string(),
            })?;
            if !more {
                break;
            }
            batch.push(indices.record(&row, row_number)?);
        }

        debug!(records = batch.len(), "Export read");
        Ok(batch)
    }
}
