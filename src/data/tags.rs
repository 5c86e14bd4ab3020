//! OpenTSDB-style tag sets.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::GenerateError;

/// Value meaning "any value" in a tag filter or group-by.
pub const WILDCARD: &str = "*";

/// A set of tag key/value pairs, kept sorted by key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of `key=value` pairs, e.g. `host=*,env=prod`.
    ///
    /// An empty string yields an empty set.
    pub fn parse(s: &str) -> Result<Self, GenerateError> {
        let mut set = Self::new();
        if s.trim().is_empty() {
            return Ok(set);
        }

        for pair in s.split(',') {
            let mut parts = pair.split('=');
            let (key, value) = match (parts.next(), parts.next(), parts.next()) {
                (Some(k), Some(v), None) => (k.trim(), v.trim()),
                _ => return Err(GenerateError::InvalidTag(pair.to_string())),
            };
            if key.is_empty() || value.is_empty() {
                return Err(GenerateError::InvalidTag(pair.to_string()));
            }
            if set.0.contains_key(key) {
                return Err(GenerateError::DuplicateTag(key.to_string()));
            }
            set.0.insert(key.to_string(), value.to_string());
        }

        Ok(set)
    }

    /// Insert a tag, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Check if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Copy every tag of `other` into this set, overwriting on conflict.
    pub fn merge(&mut self, other: &TagSet) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Add `key=*` for every key not already in the set.
    pub fn fill_wildcards<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if !self.0.contains_key(key) {
                self.0.insert(key.to_string(), WILDCARD.to_string());
            }
        }
    }

    /// Render as `k=v,k=v`, sorted by key and without braces.
    pub fn tags(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.tags())
    }
}
