//! Credential record model for rows read from a password-manager export.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// One login read from an export.
///
/// The password is held as a `SecretString` so it never shows up in `Debug`
/// output or logs. Records are immutable once read.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Stored login URI (any text the user entered)
    pub uri: String,
    /// Login username
    pub username: String,
    /// Login password
    password: SecretString,
    /// 1-based data row in the source file (header excluded), 0 if unknown
    pub row: usize,
}

impl CredentialRecord {
    /// Creates a record without source position
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            row: 0,
        }
    }

    /// Sets the source row number
    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Exposes the password for encoding (should be used carefully)
    #[must_use]
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Returns the first required field that is empty, if any
    #[must_use]
    pub fn first_empty_field(&self) -> Option<RecordField> {
        if self.uri.is_empty() {
            Some(RecordField::Uri)
        } else if self.username.is_empty() {
            Some(RecordField::Username)
        } else if self.expose_password().is_empty() {
            Some(RecordField::Password)
        } else {
            None
        }
    }

    /// Returns the first field containing a line break, if any
    #[must_use]
    pub fn first_multiline_field(&self) -> Option<RecordField> {
        let has_break = |s: &str| s.contains(['\n', '\r']);
        if has_break(&self.uri) {
            Some(RecordField::Uri)
        } else if has_break(&self.username) {
            Some(RecordField::Username)
        } else if has_break(self.expose_password()) {
            Some(RecordField::Password)
        } else {
            None
        }
    }
}

// Manual PartialEq implementation since SecretString doesn't implement it
impl PartialEq for CredentialRecord {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
            && self.username == other.username
            && self.expose_password() == other.expose_password()
            && self.row == other.row
    }
}

/// The three fields every record must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// Login URI
    Uri,
    /// Login username
    Username,
    /// Login password
    Password,
}

impl RecordField {
    /// Returns the field name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uri => "uri",
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record produced no control line.
///
/// Skipping is not an error: the conversion is best-effort and carries on
/// with the next record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum SkipReason {
    /// A required field is empty
    EmptyField(RecordField),
    /// The URI has no usable host
    NoHost,
    /// A field contains `\n` or `\r` and cannot be written on one line
    LineBreak(RecordField),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "empty {field}"),
            Self::NoHost => f.write_str("no host in uri"),
            Self::LineBreak(field) => write!(f, "line break in {field}"),
        }
    }
}
