//! Re-resolving element handle
//!
//! Holds a selector rather than a node. Every access queries the document
//! as it is now, so a handle survives the element being replaced by a
//! re-render.

use domkit_dom::{Document, NodeId};

use crate::{Result, select_one};

/// Selector-bound element reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    selector: String,
}

impl ElementHandle {
    /// Bind `selector`, failing now if nothing matches
    pub fn new(doc: &Document, selector: impl Into<String>) -> Result<Self> {
        let selector = selector.into();
        select_one(doc, &selector)?;
        Ok(Self { selector })
    }

    /// Resolve the element again
    pub fn get(&self, doc: &Document) -> Result<NodeId> {
        select_one(doc, &self.selector)
    }

    /// Resolve `sub_selector` as a descendant of the bound selector
    pub fn get_sub(&self, doc: &Document, sub_selector: &str) -> Result<NodeId> {
        select_one(doc, &format!("{} {}", self.selector, sub_selector))
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}
