//! Record-to-control-line conversion.
//!
//! The converter walks a batch in file order. Each record either becomes
//! one [`ControlLine`] or is skipped with a [`SkipReason`]; skipping never
//! aborts the run. Only sink failures and cancellation stop a conversion.

use std::io::Write;

use serde::Serialize;
use tracing::{debug, info, info_span};
use url::Url;

use crate::error::{ConvertError, ConvertResult};
use crate::factotum::{compose_line, extract_host, ComposeOptions};
use crate::logging::span_names;
use crate::models::{ControlLine, CredentialRecord, SkipReason};
use crate::output::ControlWriter;
use crate::progress::ProgressReporter;

/// Longest identifier kept for an unparsable URI
const MAX_IDENTIFIER_LEN: usize = 64;

/// A record that produced no control line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// 1-based data row in the source
    pub row: usize,
    /// The record's URI with credentials, query and fragment removed
    pub identifier: String,
    /// Why the record was skipped
    pub reason: SkipReason,
}

impl SkippedEntry {
    /// Creates a skipped entry for `record`
    #[must_use]
    pub fn new(record: &CredentialRecord, reason: SkipReason) -> Self {
        Self {
            row: record.row,
            identifier: redact_uri(&record.uri),
            reason,
        }
    }
}

/// Outcome of a conversion run
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConversionSummary {
    /// Number of control lines produced
    pub converted: usize,
    /// Records that produced no line, in file order
    pub skipped: Vec<SkippedEntry>,
}

impl ConversionSummary {
    /// Creates a new empty summary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records processed
    #[must_use]
    pub fn total_processed(&self) -> usize {
        self.converted + self.skipped.len()
    }

    /// Returns true if any records were skipped
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Returns a one-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Converted: {}, Skipped: {}",
            self.converted,
            self.skipped.len()
        )
    }

    fn record_skip(&mut self, record: &CredentialRecord, reason: SkipReason) {
        debug!(row = record.row, %reason, "Skipping record");
        self.skipped.push(SkippedEntry::new(record, reason));
    }
}

/// Converts a single record.
///
/// A line is produced only when uri, username and password are all
/// non-empty, none contains a line break, and the URI has a host.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the record cannot be converted.
pub fn convert_record(
    record: &CredentialRecord,
    options: ComposeOptions,
) -> Result<ControlLine, SkipReason> {
    if let Some(field) = record.first_empty_field() {
        return Err(SkipReason::EmptyField(field));
    }
    if let Some(field) = record.first_multiline_field() {
        return Err(SkipReason::LineBreak(field));
    }
    let service = extract_host(&record.uri).ok_or(SkipReason::NoHost)?;
    Ok(compose_line(
        &service,
        &record.username,
        record.expose_password(),
        options,
    ))
}

/// Sequential converter over a batch of records
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    options: ComposeOptions,
}

impl Converter {
    /// Creates a converter with the given compose options
    #[must_use]
    pub const fn new(options: ComposeOptions) -> Self {
        Self { options }
    }

    /// Converts every record in memory, preserving input order.
    #[must_use]
    pub fn convert_all(
        &self,
        records: &[CredentialRecord],
    ) -> (Vec<ControlLine>, ConversionSummary) {
        let _span = info_span!(span_names::CONVERT_EXECUTE, records = records.len()).entered();

        let mut lines = Vec::with_capacity(records.len());
        let mut summary = ConversionSummary::new();
        for record in records {
            match convert_record(record, self.options) {
                Ok(line) => {
                    lines.push(line);
                    summary.converted += 1;
                }
                Err(reason) => summary.record_skip(record, reason),
            }
        }

        info!(converted = summary.converted, skipped = summary.skipped.len(), "Conversion planned");
        (lines, summary)
    }

    /// Converts records and writes each line to `writer` as it is produced.
    ///
    /// Progress is reported after every record. Cancellation is checked
    /// before each record, so the sink only ever receives whole lines.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Output` if a write fails and
    /// `ConvertError::Cancelled` if the reporter requests cancellation.
    pub fn convert_to<W: Write>(
        &self,
        records: &[CredentialRecord],
        writer: &mut ControlWriter<W>,
        progress: Option<&dyn ProgressReporter>,
    ) -> ConvertResult<ConversionSummary> {
        let _span = info_span!(span_names::CONVERT_EXECUTE, records = records.len()).entered();

        let total = records.len();
        let mut summary = ConversionSummary::new();

        for (index, record) in records.iter().enumerate() {
            if progress.is_some_and(|reporter| reporter.is_cancelled()) {
                info!(processed = index, total, "Conversion cancelled");
                return Err(ConvertError::Cancelled);
            }

            match convert_record(record, self.options) {
                Ok(line) => {
                    writer.write_line(&line)?;
                    summary.converted += 1;
                }
                Err(reason) => summary.record_skip(record, reason),
            }

            if let Some(reporter) = progress {
                reporter.report(index + 1, total, &format!("Processed row {}", record.row));
            }
        }

        info!(
            converted = summary.converted,
            skipped = summary.skipped.len(),
            "Conversion complete"
        );
        Ok(summary)
    }
}

/// Returns a loggable form of a stored URI.
///
/// Parsable URIs keep only scheme, host and path; anything else is cut to
/// a bounded length.
#[must_use]
pub fn redact_uri(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => format!(
            "{}://{}{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or(""),
            parsed.path()
        ),
        Err(_) => {
            if raw.chars().count() > MAX_IDENTIFIER_LEN {
                let mut truncated: String = raw.chars().take(MAX_IDENTIFIER_LEN).collect();
                truncated.push_str("...");
                truncated
            } else {
                raw.to_string()
            }
        }
    }
}
