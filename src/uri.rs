//! The decomposed resource URI value type.

use std::fmt;
use std::str::FromStr;

use crate::builder::ResourceUriBuilder;
use crate::constants;
use crate::params::PathParameters;
use crate::parse::ParseMode;
use crate::rebase::ExistenceCheck;

/// A URI decomposed into addressing fields.
///
/// The combined path between authority and query splits into base path,
/// path parameters, selectors, extension, and suffix. Opaque URIs such as
/// `mailto:` keep their payload untouched in `scheme_specific_part` and
/// carry no path fields.
///
/// Values are immutable; derive modified copies with [`adjust`](Self::adjust)
/// or build fresh ones with [`ResourceUriBuilder`].
///
/// # Examples
///
/// ```
/// use resource_uri::ResourceUri;
///
/// let uri = ResourceUri::parse("http://host/content/page.print.html/extra?x=1");
/// assert_eq!(uri.path(), Some("/content/page"));
/// assert_eq!(uri.selectors(), ["print"]);
/// assert_eq!(uri.extension(), Some("html"));
/// assert_eq!(uri.suffix(), Some("/extra"));
/// assert_eq!(uri.to_string(), "http://host/content/page.print.html/extra?x=1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri {
    pub(crate) mode: ParseMode,
    pub(crate) scheme: Option<String>,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Option<String>,
    pub(crate) parameters: PathParameters,
    pub(crate) selectors: Vec<String>,
    pub(crate) extension: Option<String>,
    pub(crate) suffix: Option<String>,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
    pub(crate) scheme_specific_part: Option<String>,
}

impl ResourceUri {
    /// Parses a URI string. Never fails; malformed input is decomposed on a
    /// best-effort basis, observable through [`parse_mode`](Self::parse_mode).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        ResourceUriBuilder::parse(input).snapshot()
    }

    /// Parses a URI string, resolving dot ambiguity in the path against an
    /// existence oracle. See [`rebase`](crate::rebase).
    #[must_use]
    pub fn parse_with(input: &str, resolver: &dyn ExistenceCheck) -> Self {
        ResourceUriBuilder::parse_with(input, resolver).snapshot()
    }

    /// Which parser accepted the original input.
    #[must_use]
    pub fn parse_mode(&self) -> ParseMode {
        self.mode
    }

    /// Scheme, without the trailing `:`.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// User-info portion of the authority.
    #[must_use]
    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    /// Host, when the URI carries an authority.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Explicit port. `None` when the input had none.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Base path, with parameters, selectors, extension, and suffix already
    /// split off.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Path parameters in order of appearance.
    #[must_use]
    pub fn parameters(&self) -> &PathParameters {
        &self.parameters
    }

    /// Selector tokens in order.
    #[must_use]
    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    /// Extension, the final token of the dot run.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Suffix path; always starts with `/` when present.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Query, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Fragment, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Opaque scheme-specific payload, for URIs like `mailto:`.
    #[must_use]
    pub fn scheme_specific_part(&self) -> Option<&str> {
        self.scheme_specific_part.as_deref()
    }

    /// True for opaque URIs (a scheme with a non-hierarchical payload).
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.scheme_specific_part.is_some()
    }

    /// True when both scheme and host are present.
    #[must_use]
    pub fn is_full_uri(&self) -> bool {
        self.scheme.is_some() && self.host.is_some()
    }

    /// The combined path: base path with parameters, selectors, extension,
    /// and suffix reassembled, without authority or query.
    #[must_use]
    pub fn combined_path(&self) -> String {
        let mut out = String::new();
        crate::grammar::append_combined(
            &mut out,
            self.path.as_deref(),
            &self.parameters,
            &self.selectors,
            self.extension.as_deref(),
            self.suffix.as_deref(),
        );
        out
    }

    /// Derives a modified copy through a builder.
    ///
    /// The closure receives a builder pre-filled with this URI's fields;
    /// whatever it sets overrides them.
    ///
    /// ```
    /// use resource_uri::ResourceUri;
    ///
    /// let uri = ResourceUri::parse("http://host/content/page.html");
    /// let printable = uri.adjust(|b| {
    ///     b.selector("print");
    /// });
    /// assert_eq!(printable.to_string(), "http://host/content/page.print.html");
    /// ```
    #[must_use]
    pub fn adjust<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut ResourceUriBuilder<'_>),
    {
        let mut builder = ResourceUriBuilder::from_uri(self);
        f(&mut builder);
        builder.snapshot()
    }
}

impl fmt::Display for ResourceUri {
    /// Writes the canonical string form.
    ///
    /// Opaque URIs emit `scheme:payload`. Hierarchical URIs emit scheme and
    /// authority when present, eliding the port when it is the scheme's
    /// default, then the combined path, query, and fragment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(scheme), Some(payload)) = (&self.scheme, &self.scheme_specific_part) {
            write!(f, "{scheme}:{payload}")?;
            if let Some(fragment) = &self.fragment {
                write!(f, "#{fragment}")?;
            }
            return Ok(());
        }
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(user_info) = &self.user_info {
                write!(f, "{user_info}@")?;
            }
            f.write_str(host)?;
            if let Some(port) = self.port {
                let default = self.scheme.as_deref().and_then(constants::default_port);
                if default != Some(port) {
                    write!(f, ":{port}")?;
                }
            }
        }
        f.write_str(&self.combined_path())?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourceUri {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ResourceUri {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ResourceUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ResourceUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_uri_decomposition() {
        let uri =
            ResourceUri::parse("http://host/test/to/path.sel1.sel2.html/suffix/path?par1=val1");
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.host(), Some("host"));
        assert_eq!(uri.path(), Some("/test/to/path"));
        assert_eq!(uri.selectors(), ["sel1", "sel2"]);
        assert_eq!(uri.extension(), Some("html"));
        assert_eq!(uri.suffix(), Some("/suffix/path"));
        assert_eq!(uri.query(), Some("par1=val1"));
        assert!(uri.is_full_uri());
        assert!(!uri.is_opaque());
    }

    #[test]
    fn path_only_full_example_round_trips() {
        let input = "/test/to/path.sel1.sel2.html/suffix/path?par1=val1&par2=val2";
        let uri = ResourceUri::parse(input);
        assert_eq!(uri.path(), Some("/test/to/path"));
        assert_eq!(uri.selectors(), ["sel1", "sel2"]);
        assert_eq!(uri.extension(), Some("html"));
        assert_eq!(uri.suffix(), Some("/suffix/path"));
        assert_eq!(uri.query(), Some("par1=val1&par2=val2"));
        assert_eq!(uri.to_string(), input);
    }

    #[test]
    fn opaque_uri_ignores_path_adjustments() {
        let uri = ResourceUri::parse("mailto:jon.doe@example.com");
        let adjusted = uri.adjust(|b| {
            b.path("/ignored").selector("print").extension("html");
        });
        assert_eq!(adjusted.path(), None);
        assert_eq!(adjusted.to_string(), "mailto:jon.doe@example.com");
    }

    #[test]
    fn canonical_form_round_trips() {
        let input = "https://user@host:8443/a/b.sel.html/c?x=1#frag";
        assert_eq!(ResourceUri::parse(input).to_string(), input);
    }

    #[test]
    fn default_port_is_elided() {
        let uri = ResourceUri::parse("http://host:80/a");
        assert_eq!(uri.port(), Some(80));
        assert_eq!(uri.to_string(), "http://host/a");

        let uri = ResourceUri::parse("https://host:443/a");
        assert_eq!(uri.to_string(), "https://host/a");

        // Non-default ports survive.
        let uri = ResourceUri::parse("http://host:8080/a");
        assert_eq!(uri.to_string(), "http://host:8080/a");
    }

    #[test]
    fn opaque_uri_is_untouched() {
        let uri = ResourceUri::parse("mailto:jon.doe@example.com");
        assert!(uri.is_opaque());
        assert_eq!(uri.scheme(), Some("mailto"));
        assert_eq!(uri.scheme_specific_part(), Some("jon.doe@example.com"));
        assert_eq!(uri.path(), None);
        assert_eq!(uri.extension(), None);
        assert_eq!(uri.to_string(), "mailto:jon.doe@example.com");
    }

    #[test]
    fn path_only_input() {
        let uri = ResourceUri::parse("/content/page.html");
        assert_eq!(uri.scheme(), None);
        assert_eq!(uri.host(), None);
        assert_eq!(uri.path(), Some("/content/page"));
        assert_eq!(uri.extension(), Some("html"));
        assert!(!uri.is_full_uri());
        assert_eq!(uri.to_string(), "/content/page.html");
    }

    #[test]
    fn parameters_round_trip_quoted() {
        let uri = ResourceUri::parse("/content;v='1.0'/page.html");
        assert_eq!(uri.parameters().get("v"), Some("1.0"));
        assert_eq!(uri.path(), Some("/content/page"));
        // Canonical form re-attaches parameters after the base path.
        assert_eq!(uri.to_string(), "/content/page;v='1.0'.html");
    }

    #[test]
    fn parse_with_oracle_rebases() {
        let oracle = |path: &str| path == "/test/to/file.ext.sel1";
        let uri = ResourceUri::parse_with("/test/to/file.ext.sel1.json/suffix/path.js", &oracle);
        assert_eq!(uri.path(), Some("/test/to/file.ext.sel1"));
        assert_eq!(uri.extension(), Some("json"));
        assert_eq!(uri.suffix(), Some("/suffix/path.js"));
    }

    #[test]
    fn adjust_overrides_fields() {
        let uri = ResourceUri::parse("http://host/content/page.html");
        let adjusted = uri.adjust(|b| {
            b.extension("json").selector("print");
        });
        assert_eq!(adjusted.to_string(), "http://host/content/page.print.json");
        // The original is unchanged.
        assert_eq!(uri.to_string(), "http://host/content/page.html");
    }

    #[test]
    fn from_str_is_infallible() {
        let uri: ResourceUri = "not a uri at all ://".parse().unwrap();
        assert_eq!(uri.parse_mode(), ParseMode::BestEffort);
    }

    #[test]
    fn combined_path_reassembles() {
        let uri = ResourceUri::parse("http://host/a/b.sel.html/c?x=1");
        assert_eq!(uri.combined_path(), "/a/b.sel.html/c");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let uri = ResourceUri::parse("http://host/a/b.html");
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"http://host/a/b.html\"");
        let back: ResourceUri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uri);
    }
}
