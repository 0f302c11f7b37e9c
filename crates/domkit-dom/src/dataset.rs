//! DOMStringMap (dataset)
//!
//! Implements dataset for data-* attribute access.

use crate::ElementData;

/// Prefix shared by all data attributes
pub const DATA_PREFIX: &str = "data-";

/// Snapshot of an element's data-* attributes, keyed by camelCase name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<(String, String)>,
}

impl Dataset {
    /// Collect data-* attributes in source order
    pub fn from_element(element: &ElementData) -> Self {
        let entries = element
            .attrs
            .iter()
            .filter_map(|attr| {
                attr_name_to_key(&attr.name).map(|key| (key, attr.value.clone()))
            })
            .collect();
        Self { entries }
    }

    /// Get value by camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in attribute order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// `data-user-id` → `userId`; `None` for non-data attributes
pub fn attr_name_to_key(name: &str) -> Option<String> {
    name.strip_prefix(DATA_PREFIX).map(to_camel_case)
}

/// `userId` or `user-id` → `data-user-id`
pub fn key_to_attr_name(key: &str) -> String {
    format!("{DATA_PREFIX}{}", to_kebab_case(key))
}

/// Convert kebab-case to camelCase
fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;

    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert camelCase to kebab-case
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}
