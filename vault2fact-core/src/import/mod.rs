//! Import engine for reading password-manager exports.
//!
//! Each export format implements [`ImportSource`] and produces a
//! [`RecordBatch`] of credential records in file order. Fatal input
//! problems (missing file, missing header columns, malformed rows) are
//! returned as errors; deciding which records are usable is left to the
//! converter.

mod bitwarden;
mod traits;

pub use bitwarden::{BitwardenCsvImporter, ColumnIndices};
pub use traits::{ImportSource, RecordBatch};
