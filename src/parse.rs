//! Whole-URI splitting: strict parser with a permissive regex fallback.
//!
//! [`split_uri`] never fails. It first runs the strict splitter; malformed
//! scheme or authority syntax routes the input through an always-matching
//! regex decomposition instead, preserving whatever literal components the
//! pattern captures. The outcome carries a [`ParseMode`] tag so callers can
//! tell which path ran.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{UriSyntaxError, UriSyntaxErrorKind};

/// Which code path produced a [`SplitUri`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// The strict splitter accepted the input.
    Strict,
    /// Strict parsing failed; the permissive regex decomposition ran.
    BestEffort,
}

/// A URI split into its top-level components, before path decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUri {
    /// Which parser produced this split.
    pub mode: ParseMode,
    /// Scheme, without the trailing `:`.
    pub scheme: Option<String>,
    /// User-info portion of the authority, without the `@`.
    pub user_info: Option<String>,
    /// Host; set only for authority-bearing URIs.
    pub host: Option<String>,
    /// Port, when present and a valid decimal `u16`.
    pub port: Option<u16>,
    /// Raw combined path; empty for opaque and pathless URIs.
    pub path: String,
    /// Query, without the leading `?`. An empty query is preserved.
    pub query: Option<String>,
    /// Fragment, without the leading `#`. An empty fragment is preserved.
    pub fragment: Option<String>,
    /// Opaque scheme-specific payload; mutually exclusive with `path`.
    pub scheme_specific_part: Option<String>,
}

/// RFC 3986 appendix-B shape, extended with user-info and port groups.
/// Matches any input.
static LENIENT_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([^:/?#]+):)?(?://(?:([^@/?#]*)@)?([^/?#:]*)(?::([^/?#]*))?)?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$",
    )
    .expect("lenient URI pattern is valid")
});

/// Splits a URI string, falling back to the permissive decomposition when
/// strict parsing rejects the input.
///
/// # Examples
///
/// ```
/// use resource_uri::{split_uri, ParseMode};
///
/// let split = split_uri("http://host/a/b.html");
/// assert_eq!(split.mode, ParseMode::Strict);
/// assert_eq!(split.scheme.as_deref(), Some("http"));
///
/// // Malformed port: handled, but tagged as best effort.
/// let split = split_uri("http://host:port/a");
/// assert_eq!(split.mode, ParseMode::BestEffort);
/// assert_eq!(split.host.as_deref(), Some("host"));
/// ```
#[must_use]
pub fn split_uri(input: &str) -> SplitUri {
    strict_split(input).unwrap_or_else(|_| lenient_split(input))
}

/// Strict URI splitter.
///
/// # Errors
///
/// Returns [`UriSyntaxError`] when the scheme violates
/// `ALPHA (ALPHA/DIGIT/+/-/.)*`, the port is not a decimal `u16`, or the
/// authority contains whitespace or control characters.
pub fn strict_split(input: &str) -> Result<SplitUri, UriSyntaxError> {
    let err = |kind: UriSyntaxErrorKind| UriSyntaxError {
        input: input.to_string(),
        kind,
    };

    let (rest, fragment) = match input.find('#') {
        Some(i) => (&input[..i], Some(input[i + 1..].to_string())),
        None => (input, None),
    };

    let mut scheme = None;
    let mut after_scheme = rest;
    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        if !candidate.contains('/') && !candidate.contains('?') {
            if candidate.is_empty() {
                return Err(err(UriSyntaxErrorKind::EmptyScheme));
            }
            for (position, char) in candidate.char_indices() {
                let valid = if position == 0 {
                    char.is_ascii_alphabetic()
                } else {
                    char.is_ascii_alphanumeric() || matches!(char, '+' | '-' | '.')
                };
                if !valid {
                    return Err(err(UriSyntaxErrorKind::InvalidSchemeChar { char, position }));
                }
            }
            scheme = Some(candidate.to_string());
            after_scheme = &rest[colon + 1..];
        }
    }

    // Scheme without authority: the remainder is the opaque payload.
    if scheme.is_some() && !after_scheme.starts_with("//") {
        return Ok(SplitUri {
            mode: ParseMode::Strict,
            scheme,
            user_info: None,
            host: None,
            port: None,
            path: String::new(),
            query: None,
            fragment,
            scheme_specific_part: Some(after_scheme.to_string()),
        });
    }

    let mut user_info = None;
    let mut host = None;
    let mut port = None;
    let path_and_query = if let Some(auth_rest) = after_scheme.strip_prefix("//") {
        let end = auth_rest.find(['/', '?']).unwrap_or(auth_rest.len());
        let authority = &auth_rest[..end];
        if let Some((position, char)) = authority
            .char_indices()
            .find(|&(_, c)| c.is_whitespace() || c.is_control())
        {
            return Err(err(UriSyntaxErrorKind::InvalidAuthorityChar { char, position }));
        }
        let (ui, host_port) = match authority.rfind('@') {
            Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
            None => (None, authority),
        };
        user_info = ui.map(str::to_string);
        let (host_str, port_str) = split_host_port(host_port);
        if let Some(value) = port_str {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err(UriSyntaxErrorKind::InvalidPort {
                    value: value.to_string(),
                }));
            }
            let parsed: u16 = value.parse().map_err(|_| {
                err(UriSyntaxErrorKind::InvalidPort {
                    value: value.to_string(),
                })
            })?;
            port = Some(parsed);
        }
        if !host_str.is_empty() {
            host = Some(host_str.to_string());
        }
        &auth_rest[end..]
    } else {
        after_scheme
    };

    let (path, query) = match path_and_query.find('?') {
        Some(i) => (
            &path_and_query[..i],
            Some(path_and_query[i + 1..].to_string()),
        ),
        None => (path_and_query, None),
    };

    Ok(SplitUri {
        mode: ParseMode::Strict,
        scheme,
        user_info,
        host,
        port,
        path: path.to_string(),
        query,
        fragment,
        scheme_specific_part: None,
    })
}

/// Splits `host[:port]`, keeping IPv6 bracket literals intact.
fn split_host_port(host_port: &str) -> (&str, Option<&str>) {
    if let Some(bracket) = host_port.strip_prefix('[') {
        if let Some(close) = bracket.find(']') {
            let host = &host_port[..close + 2];
            return match host_port[close + 2..].strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => (host, None),
            };
        }
        return (host_port, None);
    }
    match host_port.rfind(':') {
        Some(colon) => (&host_port[..colon], Some(&host_port[colon + 1..])),
        None => (host_port, None),
    }
}

/// Best-effort decomposition; always succeeds.
fn lenient_split(input: &str) -> SplitUri {
    let captures = LENIENT_URI
        .captures(input)
        .expect("lenient pattern matches any input");
    let capture = |i: usize| captures.get(i).map(|m| m.as_str().to_string());

    let scheme = capture(1);
    let user_info = capture(2);
    let host = capture(3).filter(|h| !h.is_empty());
    let port = capture(4).and_then(|p| p.parse().ok());
    let query = capture(6);
    let fragment = capture(7);

    // Opaque form: a scheme with no authority. The payload is everything
    // after the scheme separator, up to the fragment.
    if let (Some(scheme), None) = (&scheme, &host) {
        let after = &input[scheme.len() + 1..];
        let payload_end = after.find('#').unwrap_or(after.len());
        if !after.starts_with('/') {
            return SplitUri {
                mode: ParseMode::BestEffort,
                scheme: Some(scheme.clone()),
                user_info: None,
                host: None,
                port: None,
                path: String::new(),
                query: None,
                fragment,
                scheme_specific_part: Some(after[..payload_end].to_string()),
            };
        }
    }

    SplitUri {
        mode: ParseMode::BestEffort,
        scheme,
        user_info,
        host,
        port,
        path: capture(5).unwrap_or_default(),
        query,
        fragment,
        scheme_specific_part: None,
    }
}
