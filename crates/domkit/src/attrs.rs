//! Attribute and data readers

use std::collections::HashMap;

use domkit_dom::{DATA_PREFIX, Dataset, Document, ElementData, NodeId, key_to_attr_name};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Value of a data attribute
///
/// An empty attribute (`data-open` or `data-open=""`) reads as a flag,
/// serialized as JSON `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    Flag,
    Text(String),
}

impl Serialize for DataValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(true) => Ok(Self::Flag),
            Raw::Bool(false) => Err(serde::de::Error::custom("data flag must be true")),
            Raw::Text(text) => Ok(Self::Text(text)),
        }
    }
}

impl DataValue {
    fn from_raw(value: &str) -> Self {
        if value.is_empty() {
            Self::Flag
        } else {
            Self::Text(value.to_string())
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    /// Text value, if not a flag
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag => None,
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn element<'a>(doc: &'a Document, id: NodeId) -> Result<&'a ElementData> {
    doc.tree
        .element(id)
        .ok_or_else(|| Error::not_found(format!("element {id}")))
}

fn element_mut(doc: &mut Document, id: NodeId) -> Result<&mut ElementData> {
    doc.tree
        .element_mut(id)
        .ok_or_else(|| Error::not_found(format!("element {id}")))
}

/// Read one data attribute; `name` may be `user-id` or `userId`
pub fn get_data(doc: &Document, id: NodeId, name: &str) -> Result<DataValue> {
    if name.is_empty() {
        return Err(Error::invalid("data attribute name must not be empty"));
    }
    let attr = key_to_attr_name(name);
    element(doc, id)?
        .get_attr(&attr)
        .map(DataValue::from_raw)
        .ok_or_else(|| Error::not_found(format!("attribute {attr} on {id}")))
}

/// Aggregate data reader
///
/// Only empty-valued data attributes are returned, each as the `true`
/// flag; data attributes carrying text are left out. Keys use dataset
/// camelCase naming.
pub fn get_all_data(doc: &Document, id: NodeId) -> Result<HashMap<String, DataValue>> {
    let dataset = Dataset::from_element(element(doc, id)?);
    Ok(dataset
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| (key.to_string(), DataValue::Flag))
        .collect())
}

/// Every non-data attribute as a flat name → value mapping
pub fn get_attributes(doc: &Document, id: NodeId) -> Result<HashMap<String, String>> {
    Ok(element(doc, id)?
        .attrs
        .iter()
        .filter(|attr| !attr.name.starts_with(DATA_PREFIX))
        .map(|attr| (attr.name.clone(), attr.value.clone()))
        .collect())
}

/// Set several attributes in iteration order
pub fn set_attributes<I, K, V>(doc: &mut Document, id: NodeId, attributes: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let element = element_mut(doc, id)?;
    for (name, value) in attributes {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(Error::invalid("attribute name must not be empty"));
        }
        element.set_attr(name, value);
    }
    Ok(())
}

/// Write one data attribute; a flag writes the empty string
pub fn set_data(doc: &mut Document, id: NodeId, name: &str, value: DataValue) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid("data attribute name must not be empty"));
    }
    let raw = match value {
        DataValue::Flag => String::new(),
        DataValue::Text(text) => text,
    };
    element_mut(doc, id)?.set_attr(&key_to_attr_name(name), raw);
    Ok(())
}
