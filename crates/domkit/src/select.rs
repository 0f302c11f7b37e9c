//! Selector accessors
//!
//! Thin wrappers over the host's query methods that turn "nothing
//! matched" into an error. An empty collection is never a valid result;
//! callers that expect absence should ask [`exists`] first.

use domkit_dom::{Document, NodeId, SelectorList};

use crate::{Error, Result};

fn parse(selector: &str) -> Result<SelectorList> {
    if selector.trim().is_empty() {
        return Err(Error::invalid("selector must be a non-empty string"));
    }
    Ok(SelectorList::parse(selector)?)
}

fn check_scope(doc: &Document, target: NodeId) -> Result<()> {
    match doc.tree.get(target) {
        Some(node) if node.is_container() => Ok(()),
        Some(_) => Err(Error::invalid(format!("query target {target} is not an element"))),
        None => Err(Error::not_found(format!("query target {target}"))),
    }
}

/// First element matching `selector` in the document
pub fn select_one(doc: &Document, selector: &str) -> Result<NodeId> {
    select_one_within(doc, NodeId::ROOT, selector)
}

/// First element matching `selector` strictly inside `target`
pub fn select_one_within(doc: &Document, target: NodeId, selector: &str) -> Result<NodeId> {
    check_scope(doc, target)?;
    let selectors = parse(selector)?;
    doc.tree
        .select_first(target, &selectors)
        .ok_or_else(|| Error::not_found(format!("no element matches {selector:?}")))
}

/// Every element matching `selector` in the document, in document order
pub fn select_all(doc: &Document, selector: &str) -> Result<Vec<NodeId>> {
    select_all_within(doc, NodeId::ROOT, selector)
}

/// Every element matching `selector` strictly inside `target`
pub fn select_all_within(doc: &Document, target: NodeId, selector: &str) -> Result<Vec<NodeId>> {
    check_scope(doc, target)?;
    let selectors = parse(selector)?;
    let matches = doc.tree.select(target, &selectors);
    if matches.is_empty() {
        return Err(Error::not_found(format!("no elements match {selector:?}")));
    }
    Ok(matches)
}

/// True iff every selector matches at least one element in the document
pub fn exists<S: AsRef<str>>(doc: &Document, selectors: &[S]) -> bool {
    exists_within(doc, NodeId::ROOT, selectors)
}

/// True iff every selector matches at least one element inside `target`
///
/// Invalid selectors and invalid targets count as "does not exist".
pub fn exists_within<S: AsRef<str>>(doc: &Document, target: NodeId, selectors: &[S]) -> bool {
    selectors
        .iter()
        .all(|s| select_one_within(doc, target, s.as_ref()).is_ok())
}
