//! Decomposed resource URIs for content-addressed systems.
//!
//! A resource address carries more than a path: selectors choosing a
//! rendering, an extension choosing a representation, a suffix path passed
//! to the resource, and path parameters. This crate splits such addresses
//! into their fields, reassembles them canonically, resolves the inherent
//! dot ambiguity against an existence oracle, and matches paths against
//! reduced sets of subtree roots and glob patterns.
//!
//! # Parsing
//!
//! ```
//! use resource_uri::ResourceUri;
//!
//! let uri = ResourceUri::parse("http://host/docs/report.print.a4.html/extra?lang=fr");
//! assert_eq!(uri.path(), Some("/docs/report"));
//! assert_eq!(uri.selectors(), ["print", "a4"]);
//! assert_eq!(uri.extension(), Some("html"));
//! assert_eq!(uri.suffix(), Some("/extra"));
//! assert_eq!(uri.query(), Some("lang=fr"));
//! ```
//!
//! Parsing never fails. Input the strict parser rejects is decomposed on a
//! best-effort basis and tagged accordingly:
//!
//! ```
//! use resource_uri::{ParseMode, ResourceUri};
//!
//! let uri = ResourceUri::parse("http://host:not-a-port/a");
//! assert_eq!(uri.parse_mode(), ParseMode::BestEffort);
//! assert_eq!(uri.host(), Some("host"));
//! ```
//!
//! # Disambiguation
//!
//! Dots in node names make the grammar ambiguous. When an existence oracle
//! is available, [`ResourceUri::parse_with`] fixes the base path at the
//! longest existing prefix:
//!
//! ```
//! use resource_uri::ResourceUri;
//!
//! let oracle = |path: &str| path == "/data/report.2026";
//! let uri = ResourceUri::parse_with("/data/report.2026.html", &oracle);
//! assert_eq!(uri.path(), Some("/data/report.2026"));
//! assert_eq!(uri.extension(), Some("html"));
//! ```
//!
//! # Path sets
//!
//! ```
//! use resource_uri::PathSet;
//!
//! let set = PathSet::from_paths(["/content", "/content/nested", "glob:/var/*/cache"]).unwrap();
//! assert_eq!(set.len(), 2); // the nested root was redundant
//! assert!(set.matches("/content/nested/page").is_some());
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
pub mod constants;
mod error;
mod grammar;
mod params;
mod parse;
mod path_set;
pub mod prelude;
mod rebase;
mod uri;

pub use builder::{RequestInfo, ResourceUriBuilder};
pub use error::{BuilderError, PathSetError, UriSyntaxError, UriSyntaxErrorKind};
pub use grammar::{decompose, recompose, Decomposition};
pub use params::PathParameters;
pub use parse::{split_uri, strict_split, ParseMode, SplitUri};
pub use path_set::{PathEntry, PathSet};
pub use rebase::{rebase, ExistenceCheck};
pub use uri::ResourceUri;
