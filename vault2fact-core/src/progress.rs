//! Progress reporting for conversion runs.
//!
//! A conversion calls [`ProgressReporter::report`] once per record and
//! checks [`ProgressReporter::is_cancelled`] before writing each line, so a
//! run can be observed and stopped between records. The CLI logs progress
//! through [`TracingProgressReporter`].

use tracing::debug;

/// Trait for reporting progress during a conversion.
pub trait ProgressReporter: Send + Sync {
    /// Report progress update.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of records processed so far
    /// * `total` - Total number of records in the run
    /// * `message` - Human-readable status message
    fn report(&self, current: usize, total: usize, message: &str);

    /// Check if the run was cancelled.
    fn is_cancelled(&self) -> bool;
}

/// A progress reporter that emits a `debug` event every `interval` records.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgressReporter {
    interval: usize,
}

impl TracingProgressReporter {
    /// Default number of records between two progress events
    pub const DEFAULT_INTERVAL: usize = 100;

    /// Creates a reporter logging every `interval` records (minimum 1).
    #[must_use]
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for TracingProgressReporter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl ProgressReporter for TracingProgressReporter {
    fn report(&self, current: usize, total: usize, message: &str) {
        if current % self.interval == 0 || current == total {
            debug!(current, total, "{message}");
        }
    }

    fn is_cancelled(&self) -> bool {
        false
    }
}
