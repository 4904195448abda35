//! Structured logging setup.
//!
//! Events go to stderr so standard output stays a clean control stream.
//! Passwords are never logged; records and control lines redact them in
//! their `Debug` output.

use tracing_subscriber::EnvFilter;

/// Span names used across the crate
pub mod span_names {
    /// Reading and resolving a CSV export
    pub const IMPORT_READ: &str = "vault2fact.import.read";
    /// Converting records into control lines
    pub const CONVERT_EXECUTE: &str = "vault2fact.convert.execute";
    /// Opening an output sink
    pub const OUTPUT_OPEN: &str = "vault2fact.output.open";
}

/// Maps a `-v` count to a default filter directive.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is derived from
/// `verbosity`. Calling this twice is harmless, the second call is ignored.
pub fn init_subscriber(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
