//! Path parameter map for `;key='value'` path tokens.

use std::fmt;

/// Path parameters extracted from a combined path.
///
/// Keys are unique; insertion order is preserved and significant for the
/// canonical string form. Re-inserting an existing key replaces its value
/// in place without moving the key.
///
/// # Examples
///
/// ```
/// use resource_uri::PathParameters;
///
/// let mut params = PathParameters::new();
/// params.insert("v", "1.0");
/// params.insert("lang", "fr");
/// assert_eq!(params.get("v"), Some("1.0"));
/// assert_eq!(params.to_string(), ";v='1.0';lang='fr'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParameters {
    entries: Vec<(String, String)>,
}

impl PathParameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Inserts a parameter, returning the previous value when the key was
    /// already present. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut entry.1, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for PathParameters {
    /// Emits each parameter in the quoted `;key='value'` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            write!(f, ";{key}='{value}'")?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for PathParameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
