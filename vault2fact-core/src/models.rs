//! Core data models for vault2fact
//!
//! This module defines the records read from a password-manager export and
//! the control lines produced for them.

mod control_line;
mod record;

pub use control_line::ControlLine;
pub use record::{CredentialRecord, RecordField, SkipReason};
