//! Control line composition.

use crate::models::ControlLine;

use super::quote::{encode, quote};

/// Protocol attribute written on every key directive
pub const PROTO: &str = "pass";

/// Options controlling how a control line is composed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Quote the password even when it is a safe bare token
    pub always_quote_password: bool,
}

impl ComposeOptions {
    /// Sets whether passwords are always quoted
    #[must_use]
    pub const fn with_always_quote_password(mut self, always: bool) -> Self {
        self.always_quote_password = always;
        self
    }
}

/// Builds the control line for one credential.
///
/// `service` is the extracted host, `user` and `password` are raw record
/// fields. Every value is encoded, so no field content can add a token.
#[must_use]
pub fn compose_line(
    service: &str,
    user: &str,
    password: &str,
    options: ComposeOptions,
) -> ControlLine {
    let key = format!(
        "key proto={PROTO} service={} user={}",
        encode(service),
        encode(user)
    );
    let password = if options.always_quote_password {
        quote(password)
    } else {
        encode(password)
    };
    ControlLine::from_directives(key, format!("!password={password}"))
}

/// Composes the rendered control line with default options.
#[must_use]
pub fn compose(service: &str, user: &str, password: &str) -> String {
    compose_line(service, user, password, ComposeOptions::default()).to_string()
}
