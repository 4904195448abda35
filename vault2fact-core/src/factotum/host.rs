//! Host extraction from stored login URIs.
//!
//! Password-manager exports put whatever the user typed into the URI column:
//! full URLs, app identifiers such as `androidapp://com.example.app`, bare
//! hostnames, or free text. Only absolute URIs (and scheme-relative `//host`
//! references) with a non-empty host yield a service name; everything else
//! is reported as absent so the caller can skip the record.

use std::borrow::Cow;

use url::{Host, Url};

/// Scheme assumed for scheme-relative references such as `//host/path`
const RELATIVE_SCHEME: &str = "https:";

/// Extracts the hostname from `raw`.
///
/// Returns `None` unless `raw` is an absolute URI of the form
/// `scheme://authority...` or a scheme-relative `//authority...` reference
/// with a non-empty host. Text with ASCII control characters or with
/// surrounding whitespace is rejected, as are forms the URL parser would
/// repair (`http:host`, `https:/host`, `http:\\host`, `https:///host`).
///
/// The host keeps the case it was written with: `ftp://Sub.Example.ORG/`
/// yields `Sub.Example.ORG`. When the parser had to rewrite the host
/// (IDNA to punycode, percent-decoding, IPv4 shorthand such as `0x7f.1`)
/// the parser's canonical form is returned instead. IPv6 literals are
/// returned without brackets. Userinfo and port are never included.
#[must_use]
pub fn extract_host(raw: &str) -> Option<String> {
    if !is_plain(raw) {
        return None;
    }

    let candidate: Cow<'_, str> = if raw.starts_with("//") {
        Cow::Owned(format!("{RELATIVE_SCHEME}{raw}"))
    } else if has_scheme_prefix(raw) {
        Cow::Borrowed(raw)
    } else {
        return None;
    };

    let authority = authority(&candidate)?;
    if authority.is_empty() || authority.contains('\\') {
        return None;
    }

    let parsed = Url::parse(&candidate).ok()?;
    let canonical = match parsed.host()? {
        Host::Domain(domain) => domain.to_string(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    };
    if canonical.is_empty() {
        return None;
    }

    let written = written_host(authority);
    if written.eq_ignore_ascii_case(&canonical) {
        Some(written.to_string())
    } else {
        Some(canonical)
    }
}

/// Rejects control characters and leading or trailing whitespace.
fn is_plain(raw: &str) -> bool {
    !raw.bytes().any(|b| b.is_ascii_control())
        && !raw.starts_with(char::is_whitespace)
        && !raw.ends_with(char::is_whitespace)
}

/// Returns true if `raw` starts with a valid scheme directly followed by `://`.
fn has_scheme_prefix(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Returns the authority following `://`, up to the path, query or fragment.
fn authority(candidate: &str) -> Option<&str> {
    let (_, rest) = candidate.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Returns the host exactly as written in `authority`, without userinfo or port.
fn written_host(authority: &str) -> &str {
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split_once(']').map_or(bracketed, |(host, _)| host);
    }
    host_port.rsplit_once(':').map_or(host_port, |(host, _)| host)
}
