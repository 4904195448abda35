//! Control line model.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// One credential rendered as factotum control directives.
///
/// Holds the key registration directive and the password attribute
/// directive. The attribute carries the secret, so it is kept in a
/// `SecretString` and redacted from `Debug`. `Display` renders the line as
/// written to the sink, without a trailing newline.
#[derive(Clone)]
pub struct ControlLine {
    key: String,
    password: SecretString,
}

impl ControlLine {
    pub(crate) fn from_directives(key: String, password: String) -> Self {
        Self {
            key,
            password: SecretString::from(password),
        }
    }

    /// Returns the `key proto=pass service=... user=...` directive
    #[must_use]
    pub fn key_directive(&self) -> &str {
        &self.key
    }

    /// Returns the `!password=...` directive
    #[must_use]
    pub fn password_directive(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Display for ControlLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.password_directive())
    }
}

impl fmt::Debug for ControlLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlLine")
            .field("key", &self.key)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Manual PartialEq implementation since SecretString doesn't implement it
impl PartialEq for ControlLine {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.password_directive() == other.password_directive()
    }
}

impl Eq for ControlLine {}
