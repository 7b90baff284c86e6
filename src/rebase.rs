//! Disambiguation of dot-ambiguous paths against an existence oracle.
//!
//! The combined-path grammar cannot tell how many dot tokens belong to the
//! base path: `/a/file.ext.sel1.json` is one node named `file` with three
//! dot tokens, or a node named `file.ext.sel1` with one. [`rebase`] resolves
//! this by probing an external oracle for the longest existing prefix.

use crate::grammar::{self, Decomposition};

/// External capability answering whether a literal path denotes an existing
/// node.
///
/// The call may block (a namespace lookup, possibly remote). This layer
/// performs no retry, caching, or timeout; such policy belongs to the oracle
/// implementation.
///
/// The trait is implemented for any `Fn(&str) -> bool`, which keeps tests
/// and simple oracles concise:
///
/// ```
/// use resource_uri::{rebase, ExistenceCheck};
///
/// let oracle = |path: &str| path == "/var/data.backup";
/// assert!(oracle.exists("/var/data.backup"));
/// let d = rebase("/var/data.backup.json", &oracle);
/// assert_eq!(d.base_path.as_deref(), Some("/var/data.backup"));
/// assert_eq!(d.extension.as_deref(), Some("json"));
/// ```
pub trait ExistenceCheck {
    /// Returns true if `path` currently exists.
    fn exists(&self, path: &str) -> bool;
}

impl<F> ExistenceCheck for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// Decomposes `combined`, fixing the base path at the longest prefix the
/// oracle reports as existing.
///
/// Candidates are generated from longest to shortest: the input with any
/// trailing `/`-run stripped, then repeated cuts at the last remaining `.`.
/// The first `exists` hit wins and the remainder is re-split as the
/// selector/extension/suffix run (with the leading matched dot consumed).
/// When no candidate exists, or the input has no path, the result is the
/// plain [`decompose`](crate::decompose) output.
///
/// At most one oracle call per dot in the input, sequential, stopping at the
/// first hit.
#[must_use]
pub fn rebase(combined: &str, resolver: &dyn ExistenceCheck) -> Decomposition {
    let (residual, parameters) = grammar::strip_parameters(combined);
    let stripped = residual.trim_end_matches('/');
    if stripped.is_empty() {
        let mut decomposition = grammar::split_residual(&residual);
        decomposition.parameters = parameters;
        return decomposition;
    }
    let mut candidate = stripped;
    loop {
        if resolver.exists(candidate) {
            let remainder = &residual[candidate.len()..];
            let remainder = remainder.strip_prefix('.').unwrap_or(remainder);
            let (selectors, extension, suffix) = grammar::split_run(remainder);
            return Decomposition {
                base_path: Some(candidate.to_string()),
                parameters,
                selectors,
                extension,
                suffix,
            };
        }
        match candidate.rfind('.') {
            Some(cut) => candidate = &candidate[..cut],
            None => break,
        }
    }
    let mut decomposition = grammar::split_residual(&residual);
    decomposition.parameters = parameters;
    decomposition
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn longest_existing_prefix_wins() {
        let oracle = |path: &str| path == "/test/to/file.ext.sel1";
        let d = rebase("/test/to/file.ext.sel1.json/suffix/path.js", &oracle);
        assert_eq!(d.base_path.as_deref(), Some("/test/to/file.ext.sel1"));
        assert!(d.selectors.is_empty());
        assert_eq!(d.extension.as_deref(), Some("json"));
        assert_eq!(d.suffix.as_deref(), Some("/suffix/path.js"));
    }

    #[test]
    fn full_string_match_takes_everything_as_base() {
        let oracle = |path: &str| path == "/a/b.c.d";
        let d = rebase("/a/b.c.d", &oracle);
        assert_eq!(d.base_path.as_deref(), Some("/a/b.c.d"));
        assert!(d.selectors.is_empty());
        assert_eq!(d.extension, None);
        assert_eq!(d.suffix, None);
    }

    #[test]
    fn no_match_falls_back_to_plain_decomposition() {
        let oracle = |_: &str| false;
        let d = rebase("/test/to/path.sel1.html", &oracle);
        assert_eq!(d.base_path.as_deref(), Some("/test/to/path"));
        assert_eq!(d.selectors, ["sel1"]);
        assert_eq!(d.extension.as_deref(), Some("html"));
    }

    #[test]
    fn stops_at_first_hit() {
        let calls = Cell::new(0usize);
        let oracle = |path: &str| {
            calls.set(calls.get() + 1);
            path == "/a/b.c"
        };
        let d = rebase("/a/b.c.d.e", &oracle);
        // candidates: /a/b.c.d.e, /a/b.c.d, /a/b.c -- then stop
        assert_eq!(calls.get(), 3);
        assert_eq!(d.base_path.as_deref(), Some("/a/b.c"));
        assert_eq!(d.selectors, ["d"]);
        assert_eq!(d.extension.as_deref(), Some("e"));
    }

    #[test]
    fn bounded_by_dot_count_when_nothing_exists() {
        let calls = Cell::new(0usize);
        let oracle = |_: &str| {
            calls.set(calls.get() + 1);
            false
        };
        rebase("/a/b.c.d", &oracle);
        // one probe per candidate: full, minus .d, minus .c
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn trailing_slash_run_is_stripped_from_candidates() {
        let oracle = |path: &str| path == "/a/b.c";
        let d = rebase("/a/b.c//", &oracle);
        assert_eq!(d.base_path.as_deref(), Some("/a/b.c"));
        assert_eq!(d.suffix.as_deref(), Some("//"));
        assert_eq!(d.extension, None);
    }

    #[test]
    fn parameters_are_stripped_before_probing() {
        let seen = Cell::new(false);
        let oracle = |path: &str| {
            if path.contains(';') {
                seen.set(true);
            }
            path == "/a/b.c"
        };
        let d = rebase("/a;v='1'/b.c.html", &oracle);
        assert!(!seen.get());
        assert_eq!(d.base_path.as_deref(), Some("/a/b.c"));
        assert_eq!(d.extension.as_deref(), Some("html"));
        assert_eq!(d.parameters.get("v"), Some("1"));
    }

    #[test]
    fn empty_input_skips_the_oracle() {
        let calls = Cell::new(0usize);
        let oracle = |_: &str| {
            calls.set(calls.get() + 1);
            true
        };
        let d = rebase("", &oracle);
        assert_eq!(calls.get(), 0);
        assert_eq!(d.base_path, None);
    }
}
