//! Combined-path grammar: decomposition and recomposition.
//!
//! The combined path is the portion of an address between authority and
//! query/fragment. It carries up to five fields:
//!
//! ```text
//! /base/path;key='value'.selector1.selector2.extension/suffix/path
//! ```
//!
//! Path parameters (`;key='value'` or `;key=value`) are excised first, in
//! order of appearance. The base path then ends at the first field-separator
//! dot: any `.` that does not begin a `./` or `../` navigation token. The
//! dot-separated run up to the next `/` splits into selectors plus a final
//! extension token; everything from that `/` onward is the suffix.

use crate::params::PathParameters;

/// The fields of a decomposed combined path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decomposition {
    /// Base path, absent when the input had no path at all.
    pub base_path: Option<String>,
    /// Path parameters in order of appearance.
    pub parameters: PathParameters,
    /// Selector tokens in order. Adjacent dots yield empty-string tokens,
    /// which are preserved.
    pub selectors: Vec<String>,
    /// Final token of the dot run, absent when empty.
    pub extension: Option<String>,
    /// Remainder starting at the first `/` after the dot run; always starts
    /// with `/` when present.
    pub suffix: Option<String>,
}

/// Splits a combined path string into its five fields.
///
/// This is the pure, heuristic decomposition: the first field-separator dot
/// always wins. Use [`rebase`](crate::rebase) to resolve the ambiguity
/// against an existence oracle instead.
///
/// # Examples
///
/// ```
/// use resource_uri::decompose;
///
/// let d = decompose("/test/to/path.sel1.sel2.html/suffix/path");
/// assert_eq!(d.base_path.as_deref(), Some("/test/to/path"));
/// assert_eq!(d.selectors, ["sel1", "sel2"]);
/// assert_eq!(d.extension.as_deref(), Some("html"));
/// assert_eq!(d.suffix.as_deref(), Some("/suffix/path"));
/// ```
#[must_use]
pub fn decompose(combined: &str) -> Decomposition {
    let (residual, parameters) = strip_parameters(combined);
    let mut decomposition = split_residual(&residual);
    decomposition.parameters = parameters;
    decomposition
}

/// Reassembles the combined path string from decomposed fields.
///
/// Parameters are always emitted in the quoted `;key='value'` form. No
/// separator dot is emitted when there are neither selectors nor an
/// extension; the suffix is appended verbatim.
#[must_use]
pub fn recompose(decomposition: &Decomposition) -> String {
    let mut out = String::new();
    append_combined(
        &mut out,
        decomposition.base_path.as_deref(),
        &decomposition.parameters,
        &decomposition.selectors,
        decomposition.extension.as_deref(),
        decomposition.suffix.as_deref(),
    );
    out
}

/// Writes the combined path form of the given fields into `out`.
pub(crate) fn append_combined(
    out: &mut String,
    base_path: Option<&str>,
    parameters: &PathParameters,
    selectors: &[String],
    extension: Option<&str>,
    suffix: Option<&str>,
) {
    if let Some(base) = base_path {
        out.push_str(base);
    }
    for (key, value) in parameters.iter() {
        out.push(';');
        out.push_str(key);
        out.push_str("='");
        out.push_str(value);
        out.push('\'');
    }
    if base_path.is_none() {
        return;
    }
    for selector in selectors {
        out.push('.');
        out.push_str(selector);
    }
    if let Some(extension) = extension {
        out.push('.');
        out.push_str(extension);
    }
    if let Some(suffix) = suffix {
        out.push_str(suffix);
    }
}

/// Excises `;key='value'` / `;key=value` tokens, returning the residual
/// string and the collected parameters. Unquoted values run to the next `/`.
pub(crate) fn strip_parameters(input: &str) -> (String, PathParameters) {
    let mut parameters = PathParameters::new();
    if !input.contains(';') {
        return (input.to_string(), parameters);
    }
    let mut residual = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(semi) = rest.find(';') {
        residual.push_str(&rest[..semi]);
        if let Some((key, value, consumed)) = scan_parameter(&rest[semi..]) {
            parameters.insert(key, value);
            rest = &rest[semi + consumed..];
        } else {
            residual.push(';');
            rest = &rest[semi + 1..];
        }
    }
    residual.push_str(rest);
    (residual, parameters)
}

/// Scans one parameter token at the start of `input` (which begins with
/// `;`). Returns key, value, and the byte length of the whole token.
fn scan_parameter(input: &str) -> Option<(&str, &str, usize)> {
    let body = &input[1..];
    let eq = body.find('=')?;
    let key = &body[..eq];
    if key.is_empty() || key.contains('/') || key.contains(';') {
        return None;
    }
    let after = &body[eq + 1..];
    if let Some(quoted) = after.strip_prefix('\'') {
        let close = quoted.find('\'')?;
        // ';' + key + '=' + quote + value + quote
        Some((key, &quoted[..close], 1 + eq + 1 + 1 + close + 1))
    } else {
        let end = after.find('/').unwrap_or(after.len());
        Some((key, &after[..end], 1 + eq + 1 + end))
    }
}

/// Splits a parameter-free residual string on the first field-separator dot.
pub(crate) fn split_residual(residual: &str) -> Decomposition {
    if residual.is_empty() {
        return Decomposition::default();
    }
    let Some(dot) = first_separator_dot(residual) else {
        return Decomposition {
            base_path: Some(residual.to_string()),
            ..Decomposition::default()
        };
    };
    let (selectors, extension, suffix) = split_run(&residual[dot + 1..]);
    Decomposition {
        base_path: Some(residual[..dot].to_string()),
        parameters: PathParameters::new(),
        selectors,
        extension,
        suffix,
    }
}

/// Splits the text after the base path's separator dot into selectors,
/// extension, and suffix.
pub(crate) fn split_run(rest: &str) -> (Vec<String>, Option<String>, Option<String>) {
    let (run, suffix) = match rest.find('/') {
        Some(slash) => (&rest[..slash], Some(rest[slash..].to_string())),
        None => (rest, None),
    };
    let mut tokens: Vec<String> = run.split('.').map(str::to_string).collect();
    let extension = tokens.pop().filter(|token| !token.is_empty());
    (tokens, extension, suffix)
}

fn first_separator_dot(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len()).find(|&i| bytes[i] == b'.' && is_separator_dot(bytes, i))
}

/// A dot is a field separator unless it begins a `./` or `../` navigation
/// token.
fn is_separator_dot(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1) {
        Some(b'/') => false,
        Some(b'.') => bytes.get(i + 2) != Some(&b'/'),
        _ => true,
    }
}
