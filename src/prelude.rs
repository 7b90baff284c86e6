//! Convenience re-exports of the types most callers need.
//!
//! ```
//! use resource_uri::prelude::*;
//!
//! let uri = ResourceUri::parse("http://host/a/b.print.html");
//! assert_eq!(uri.selectors(), ["print"]);
//! ```

pub use crate::builder::{RequestInfo, ResourceUriBuilder};
pub use crate::error::{BuilderError, PathSetError, UriSyntaxError};
pub use crate::grammar::{decompose, recompose, Decomposition};
pub use crate::params::PathParameters;
pub use crate::parse::{split_uri, ParseMode, SplitUri};
pub use crate::path_set::{PathEntry, PathSet};
pub use crate::rebase::{rebase, ExistenceCheck};
pub use crate::uri::ResourceUri;
