//! Fluent construction of [`ResourceUri`] values.

use std::fmt;

use crate::error::BuilderError;
use crate::grammar;
use crate::params::PathParameters;
use crate::parse::{self, ParseMode, SplitUri};
use crate::rebase::{self, ExistenceCheck};
use crate::uri::ResourceUri;

/// Server-side request view, for building a URI from a live request.
///
/// Implement this for whatever request type the embedding framework uses;
/// [`ResourceUriBuilder::from_request`] reads the addressing fields through
/// it.
pub trait RequestInfo {
    /// Request scheme, such as `http`.
    fn scheme(&self) -> &str;
    /// Host the request was addressed to.
    fn host(&self) -> &str;
    /// Explicit port, if the request carried one.
    fn port(&self) -> Option<u16>;
    /// Raw combined request path.
    fn path(&self) -> &str;
    /// Raw query string, without the `?`.
    fn query_string(&self) -> Option<&str>;
}

/// Builder for [`ResourceUri`].
///
/// Setters take effect in any order; the combined path is assembled from
/// the individual fields at [`build`](Self::build) time. Selector,
/// extension, suffix, and parameter setters are silently ignored while the
/// builder is not path-backed (no path set, or an opaque payload set),
/// since those fields only exist inside a hierarchical path.
///
/// A builder produces one URI. Calling `build` a second time yields
/// [`BuilderError::AlreadyConsumed`].
///
/// # Examples
///
/// ```
/// use resource_uri::ResourceUriBuilder;
///
/// let uri = ResourceUriBuilder::new()
///     .scheme("http")
///     .host("localhost")
///     .port(4502)
///     .path("/content/page")
///     .selector("print")
///     .extension("html")
///     .build()
///     .unwrap();
/// assert_eq!(uri.to_string(), "http://localhost:4502/content/page.print.html");
/// ```
#[derive(Clone)]
pub struct ResourceUriBuilder<'o> {
    mode: ParseMode,
    scheme: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    parameters: PathParameters,
    selectors: Vec<String>,
    extension: Option<String>,
    suffix: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
    scheme_specific_part: Option<String>,
    resolver: Option<&'o dyn ExistenceCheck>,
    consumed: bool,
}

impl Default for ResourceUriBuilder<'_> {
    fn default() -> Self {
        Self {
            mode: ParseMode::Strict,
            scheme: None,
            user_info: None,
            host: None,
            port: None,
            path: None,
            parameters: PathParameters::new(),
            selectors: Vec::new(),
            extension: None,
            suffix: None,
            query: None,
            fragment: None,
            scheme_specific_part: None,
            resolver: None,
            consumed: false,
        }
    }
}

impl fmt::Debug for ResourceUriBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceUriBuilder")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("selectors", &self.selectors)
            .field("extension", &self.extension)
            .field("suffix", &self.suffix)
            .field("query", &self.query)
            .field("scheme_specific_part", &self.scheme_specific_part)
            .field("has_resolver", &self.resolver.is_some())
            .field("consumed", &self.consumed)
            .finish()
    }
}

impl<'o> ResourceUriBuilder<'o> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from an existing URI.
    #[must_use]
    pub fn from_uri(uri: &ResourceUri) -> Self {
        Self {
            mode: uri.mode,
            scheme: uri.scheme.clone(),
            user_info: uri.user_info.clone(),
            host: uri.host.clone(),
            port: uri.port,
            path: uri.path.clone(),
            parameters: uri.parameters.clone(),
            selectors: uri.selectors.clone(),
            extension: uri.extension.clone(),
            suffix: uri.suffix.clone(),
            query: uri.query.clone(),
            fragment: uri.fragment.clone(),
            scheme_specific_part: uri.scheme_specific_part.clone(),
            ..Self::default()
        }
    }

    /// Creates a builder from a combined path, decomposing it immediately.
    #[must_use]
    pub fn from_path(combined: &str) -> Self {
        let mut builder = Self::new();
        builder.combined_path(combined);
        builder
    }

    /// Creates a builder from a full URI string.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut builder = Self::new();
        builder.ingest(parse::split_uri(input));
        builder
    }

    /// Creates a builder from a full URI string, with an existence oracle
    /// for resolving dot ambiguity in the path.
    #[must_use]
    pub fn parse_with(input: &str, resolver: &'o dyn ExistenceCheck) -> Self {
        let mut builder = Self::new();
        builder.resolver = Some(resolver);
        builder.ingest(parse::split_uri(input));
        builder
    }

    /// Creates a builder from a server request.
    #[must_use]
    pub fn from_request(request: &impl RequestInfo) -> Self {
        let mut builder = Self::new();
        builder
            .scheme(request.scheme())
            .host(request.host())
            .combined_path(request.path());
        builder.port = request.port();
        builder.query = request.query_string().map(str::to_string);
        builder
    }

    /// Attaches an existence oracle, used by later
    /// [`combined_path`](Self::combined_path) calls.
    pub fn resolver(&mut self, resolver: &'o dyn ExistenceCheck) -> &mut Self {
        self.resolver = Some(resolver);
        self
    }

    fn path_backed(&self) -> bool {
        self.path.is_some() && self.scheme_specific_part.is_none()
    }

    /// Sets the scheme.
    pub fn scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme = Some(scheme.to_string());
        self
    }

    /// Sets the authority user-info.
    pub fn user_info(&mut self, user_info: &str) -> &mut Self {
        self.user_info = Some(user_info.to_string());
        self
    }

    /// Sets the host.
    pub fn host(&mut self, host: &str) -> &mut Self {
        self.host = Some(host.to_string());
        self
    }

    /// Sets the port.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Sets the base path. Ignored when an opaque payload is already set.
    pub fn path(&mut self, path: &str) -> &mut Self {
        if self.scheme_specific_part.is_none() {
            self.path = Some(path.to_string());
        }
        self
    }

    /// Sets the opaque scheme-specific payload. Ignored when a path is
    /// already set; a URI is hierarchical or opaque, never both.
    pub fn scheme_specific_part(&mut self, payload: &str) -> &mut Self {
        if self.path.is_none() {
            self.scheme_specific_part = Some(payload.to_string());
        }
        self
    }

    /// Sets the whole combined path, replacing any previously set path,
    /// parameters, selectors, extension, and suffix.
    ///
    /// Decomposed through the attached resolver when one is present,
    /// otherwise by the plain grammar.
    pub fn combined_path(&mut self, combined: &str) -> &mut Self {
        if self.scheme_specific_part.is_some() {
            return self;
        }
        let decomposition = match self.resolver {
            Some(resolver) => rebase::rebase(combined, resolver),
            None => grammar::decompose(combined),
        };
        self.path = decomposition.base_path;
        self.parameters = decomposition.parameters;
        self.selectors = decomposition.selectors;
        self.extension = decomposition.extension;
        self.suffix = decomposition.suffix;
        self
    }

    /// Appends a selector. Ignored while the builder is not path-backed.
    pub fn selector(&mut self, selector: &str) -> &mut Self {
        if self.path_backed() {
            self.selectors.push(selector.to_string());
        }
        self
    }

    /// Replaces the selector list. Ignored while the builder is not
    /// path-backed.
    pub fn selectors<I, S>(&mut self, selectors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.path_backed() {
            self.selectors = selectors.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Sets the extension. Ignored while the builder is not path-backed.
    pub fn extension(&mut self, extension: &str) -> &mut Self {
        if self.path_backed() {
            self.extension = Some(extension.to_string());
        }
        self
    }

    /// Sets the suffix. Ignored while the builder is not path-backed.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::SuffixMissingLeadingSlash`] when the value
    /// does not start with `/`; the builder state is left unchanged.
    pub fn suffix(&mut self, suffix: &str) -> Result<&mut Self, BuilderError> {
        if !suffix.starts_with('/') {
            return Err(BuilderError::SuffixMissingLeadingSlash {
                value: suffix.to_string(),
            });
        }
        if self.path_backed() {
            self.suffix = Some(suffix.to_string());
        }
        Ok(self)
    }

    /// Adds a path parameter. Ignored while the builder is not path-backed.
    pub fn parameter(&mut self, key: &str, value: &str) -> &mut Self {
        if self.path_backed() {
            self.parameters.insert(key, value);
        }
        self
    }

    /// Sets the query, without the leading `?`.
    pub fn query(&mut self, query: &str) -> &mut Self {
        self.query = Some(query.to_string());
        self
    }

    /// Sets the fragment, without the leading `#`.
    pub fn fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = Some(fragment.to_string());
        self
    }

    /// Produces the URI.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::AlreadyConsumed`] on the second and later
    /// calls; the field state itself stays inspectable.
    pub fn build(&mut self) -> Result<ResourceUri, BuilderError> {
        if self.consumed {
            return Err(BuilderError::AlreadyConsumed);
        }
        self.consumed = true;
        Ok(self.snapshot())
    }

    /// Assembles the URI from the current field state without consuming the
    /// builder.
    pub(crate) fn snapshot(&self) -> ResourceUri {
        ResourceUri {
            mode: self.mode,
            scheme: self.scheme.clone(),
            user_info: self.user_info.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            parameters: self.parameters.clone(),
            selectors: self.selectors.clone(),
            extension: self.extension.clone(),
            suffix: self.suffix.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            scheme_specific_part: self.scheme_specific_part.clone(),
        }
    }

    fn ingest(&mut self, split: SplitUri) {
        self.mode = split.mode;
        self.scheme = split.scheme;
        self.user_info = split.user_info;
        self.host = split.host;
        self.port = split.port;
        self.query = split.query;
        self.fragment = split.fragment;
        if let Some(payload) = split.scheme_specific_part {
            self.scheme_specific_part = Some(payload);
            return;
        }
        self.combined_path(&split.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_compose_in_any_order() {
        let mut builder = ResourceUriBuilder::new();
        builder.path("/content/page");
        builder.extension("html");
        builder.selector("print");
        builder.host("host");
        builder.scheme("http");
        let uri = builder.build().unwrap();
        assert_eq!(uri.to_string(), "http://host/content/page.print.html");
    }

    #[test]
    fn selector_before_path_is_ignored() {
        let mut builder = ResourceUriBuilder::new();
        builder.selector("print").extension("html");
        builder.path("/content/page");
        let uri = builder.build().unwrap();
        assert!(uri.selectors().is_empty());
        assert_eq!(uri.extension(), None);
        assert_eq!(uri.to_string(), "/content/page");
    }

    #[test]
    fn suffix_requires_leading_slash() {
        let mut builder = ResourceUriBuilder::from_path("/a/b");
        let err = builder.suffix("no-slash").unwrap_err();
        assert_eq!(
            err,
            BuilderError::SuffixMissingLeadingSlash {
                value: "no-slash".to_string()
            }
        );
        // State is untouched; the builder remains usable.
        let uri = builder.build().unwrap();
        assert_eq!(uri.suffix(), None);
    }

    #[test]
    fn build_twice_is_an_error() {
        let mut builder = ResourceUriBuilder::from_path("/a");
        builder.build().unwrap();
        assert_eq!(builder.build().unwrap_err(), BuilderError::AlreadyConsumed);
    }

    #[test]
    fn opaque_payload_excludes_path_fields() {
        let mut builder = ResourceUriBuilder::new();
        builder
            .scheme("mailto")
            .scheme_specific_part("a@example.com")
            .path("/ignored")
            .selector("ignored")
            .extension("ignored");
        let uri = builder.build().unwrap();
        assert!(uri.is_opaque());
        assert_eq!(uri.path(), None);
        assert_eq!(uri.to_string(), "mailto:a@example.com");
    }

    #[test]
    fn path_excludes_opaque_payload() {
        let mut builder = ResourceUriBuilder::new();
        builder.path("/a").scheme_specific_part("ignored");
        let uri = builder.build().unwrap();
        assert_eq!(uri.path(), Some("/a"));
        assert!(!uri.is_opaque());
    }

    #[test]
    fn combined_path_replaces_earlier_fields() {
        let mut builder = ResourceUriBuilder::new();
        builder.path("/old").selector("stale");
        builder.combined_path("/new/page.print.html/tail");
        let uri = builder.build().unwrap();
        assert_eq!(uri.path(), Some("/new/page"));
        assert_eq!(uri.selectors(), ["print"]);
        assert_eq!(uri.extension(), Some("html"));
        assert_eq!(uri.suffix(), Some("/tail"));
    }

    #[test]
    fn combined_path_uses_attached_resolver() {
        let oracle = |path: &str| path == "/a/file.v2";
        let mut builder = ResourceUriBuilder::new();
        builder.resolver(&oracle);
        builder.combined_path("/a/file.v2.json");
        let uri = builder.build().unwrap();
        assert_eq!(uri.path(), Some("/a/file.v2"));
        assert_eq!(uri.extension(), Some("json"));
    }

    #[test]
    fn from_uri_round_trips() {
        let original = ResourceUri::parse("http://u@host:9000/a/b.s.html/c?q=1#f");
        let rebuilt = ResourceUriBuilder::from_uri(&original).build().unwrap();
        assert_eq!(rebuilt, original);
    }

    struct FakeRequest;

    impl RequestInfo for FakeRequest {
        fn scheme(&self) -> &str {
            "http"
        }
        fn host(&self) -> &str {
            "localhost"
        }
        fn port(&self) -> Option<u16> {
            Some(4502)
        }
        fn path(&self) -> &str {
            "/content/page.print.html"
        }
        fn query_string(&self) -> Option<&str> {
            Some("wcmmode=disabled")
        }
    }

    #[test]
    fn from_request_reads_all_fields() {
        let uri = ResourceUriBuilder::from_request(&FakeRequest).build().unwrap();
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.host(), Some("localhost"));
        assert_eq!(uri.port(), Some(4502));
        assert_eq!(uri.path(), Some("/content/page"));
        assert_eq!(uri.selectors(), ["print"]);
        assert_eq!(uri.extension(), Some("html"));
        assert_eq!(uri.query(), Some("wcmmode=disabled"));
    }

    #[test]
    fn parameters_are_emitted_quoted() {
        let mut builder = ResourceUriBuilder::from_path("/content/page");
        builder.parameter("v", "1.0").extension("html");
        let uri = builder.build().unwrap();
        assert_eq!(uri.to_string(), "/content/page;v='1.0'.html");
    }
}
