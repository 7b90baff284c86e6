//! Constants for resource URI handling.

/// Marker prefix identifying a glob pattern entry in a path set.
pub const GLOB_PREFIX: &str = "glob:";

/// Conventional default port for the `http` scheme.
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Conventional default port for the `https` scheme.
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Largest literal-path count for which path-set construction uses the
/// pairwise elimination instead of the segment tree.
pub const PATH_SET_PAIRWISE_LIMIT: usize = 8;

/// Returns the conventional default port for a scheme, if it has one.
///
/// The canonical string form elides a port equal to this value.
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(DEFAULT_HTTP_PORT),
        "https" => Some(DEFAULT_HTTPS_PORT),
        _ => None,
    }
}
