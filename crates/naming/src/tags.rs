//! UCD tag parsing.
//!
//! UCD tags are free text. By convention teams write `key:value`, but bare
//! markers like `smoke` or `iis` are just as common.

use std::collections::BTreeMap;

/// Key used when a tag has an empty key (`":prod"`).
pub const EMPTY_KEY: &str = "tag";

/// Value implied by a bare tag.
pub const IMPLICIT_VALUE: &str = "true";

/// Split a tag on its first `:`.
///
/// Returns `None` for blank tags.
pub fn split_tag(raw: &str) -> Option<(String, String)> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.split_once(':') {
        Some((key, value)) => {
            let key = match key.trim() {
                "" => EMPTY_KEY,
                k => k,
            };
            let value = match value.trim() {
                "" => IMPLICIT_VALUE,
                v => v,
            };
            Some((key.to_string(), value.to_string()))
        }
        None => Some((raw.to_string(), IMPLICIT_VALUE.to_string())),
    }
}

/// Parsed tags of an application, a component, or both combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    map: BTreeMap<String, String>,
    flat: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw tag strings. Later duplicates of a key win.
    pub fn parse<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = TagSet::new();
        for raw in tags {
            set.insert(raw);
        }
        set
    }

    /// Add one raw tag.
    pub fn insert(&mut self, raw: &str) {
        if let Some((key, value)) = split_tag(raw) {
            self.map.insert(key, value);
            self.flat.push(raw.trim().to_string());
        }
    }

    /// Combine two sets; `other` wins on duplicate keys.
    pub fn merged(&self, other: &TagSet) -> TagSet {
        let mut combined = self.clone();
        combined.map.extend(other.map.iter().map(|(k, v)| (k.clone(), v.clone())));
        combined.flat.extend(other.flat.iter().cloned());
        combined
    }

    /// Key to value mapping.
    pub fn map(&self) -> &BTreeMap<String, String> {
        &self.map
    }

    /// Original tag strings, in input order.
    pub fn flat(&self) -> &[String] {
        &self.flat
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
