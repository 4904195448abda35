//! Value encoding for the factotum control language.
//!
//! Factotum splits a control line into whitespace-separated tokens and
//! understands single-quoted tokens in which a literal quote is written
//! twice (`'it''s'`). Values made only of letters, digits, `.`, `_` and `-`
//! are emitted bare; everything else goes through [`quote`].

/// The delimiter used to wrap unsafe values.
pub const DELIMITER: char = '\'';

/// Returns true if `value` can be emitted as a bare token.
///
/// The string must be non-empty and contain only ASCII letters, digits,
/// `.`, `_` or `-`.
#[must_use]
pub fn is_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

/// Wraps `value` in single quotes, doubling every embedded quote.
///
/// The result is always exactly one token, whatever `value` contains.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(DELIMITER);
    for c in value.chars() {
        if c == DELIMITER {
            out.push(DELIMITER);
        }
        out.push(c);
    }
    out.push(DELIMITER);
    out
}

/// Encodes `value` for a control-line attribute.
///
/// Safe values are returned unchanged, anything else is quoted.
#[must_use]
pub fn encode(value: &str) -> String {
    if is_safe(value) {
        value.to_string()
    } else {
        quote(value)
    }
}

/// Decodes a token produced by [`encode`] or [`quote`].
///
/// Returns `None` if `token` is neither a bare safe token nor a well-formed
/// quoted token (unbalanced delimiter, stray single quote inside, trailing
/// characters after the closing quote).
#[must_use]
pub fn unquote(token: &str) -> Option<String> {
    if is_safe(token) {
        return Some(token.to_string());
    }

    let inner = token.strip_prefix(DELIMITER)?.strip_suffix(DELIMITER)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == DELIMITER {
            // A lone delimiter would have closed the token early.
            if chars.next() != Some(DELIMITER) {
                return None;
            }
        }
        out.push(c);
    }
    Some(out)
}
