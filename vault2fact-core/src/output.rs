//! Output sinks for control lines.
//!
//! Lines go to standard output, to a regular file, or straight into the
//! `ctl` file of a mounted factotum. Every line is newline-terminated and
//! handed to the sink in a single write so the broker never sees half a
//! command.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info_span};

use crate::error::{OutputError, OutputResult};
use crate::logging::span_names;
use crate::models::ControlLine;

/// File name of the control endpoint inside a factotum mount
pub const CTL_FILE: &str = "ctl";

/// Where control lines are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Stdout,
    /// A regular file, created or truncated
    File(PathBuf),
    /// The `ctl` file of a mounted factotum, which must already exist
    Factotum {
        /// Mountpoint of the factotum file system
        mount: PathBuf,
    },
}

impl OutputTarget {
    /// Returns the control file path for a factotum mountpoint
    #[must_use]
    pub fn ctl_path(mount: &Path) -> PathBuf {
        mount.join(CTL_FILE)
    }

    /// Returns the path written to, if the target is a file
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            Self::Stdout => None,
            Self::File(path) => Some(path.clone()),
            Self::Factotum { mount } => Some(Self::ctl_path(mount)),
        }
    }

    /// Opens the sink.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Open` if the file cannot be created or the
    /// factotum control file cannot be opened for writing.
    pub fn open(&self) -> OutputResult<ControlWriter<Box<dyn Write>>> {
        let _span = info_span!(span_names::OUTPUT_OPEN, sink = %self).entered();

        let sink: Box<dyn Write> = match self {
            Self::Stdout => Box::new(BufWriter::new(io::stdout())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| OutputError::Open {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Box::new(BufWriter::new(file))
            }
            Self::Factotum { mount } => {
                let ctl = Self::ctl_path(mount);
                let file = OpenOptions::new()
                    .write(true)
                    .open(&ctl)
                    .map_err(|e| OutputError::Open {
                        path: ctl.clone(),
                        reason: e.to_string(),
                    })?;
                // Unbuffered: each write is one command for factotum.
                Box::new(file)
            }
        };

        debug!("Output sink opened");
        Ok(ControlWriter::new(sink))
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Factotum { mount } => write!(f, "{}", Self::ctl_path(mount).display()),
        }
    }
}

/// Writes control lines to a sink, one newline-terminated line per write.
pub struct ControlWriter<W: Write> {
    inner: W,
    lines_written: usize,
}

impl<W: Write> ControlWriter<W> {
    /// Wraps a writer
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            lines_written: 0,
        }
    }

    /// Writes one control line followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Write` if the sink rejects the line.
    pub fn write_line(&mut self, line: &ControlLine) -> OutputResult<()> {
        let mut buf = line.to_string();
        buf.push('\n');
        self.inner
            .write_all(buf.as_bytes())
            .map_err(|e| OutputError::Write(format!("line {}: {e}", self.lines_written + 1)))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Returns the number of lines written so far
    pub const fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flushes the sink and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Io` if flushing fails.
    pub fn finish(mut self) -> OutputResult<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
