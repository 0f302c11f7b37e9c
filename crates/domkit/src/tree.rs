//! Tree mutators

use domkit_dom::{Document, NodeId};

use crate::{Error, Result};

/// Detach an element from its parent; already-detached elements are left alone
pub fn remove(doc: &mut Document, id: NodeId) -> Result<()> {
    if doc.tree.get(id).is_none() {
        return Err(Error::not_found(format!("node {id}")));
    }
    if id == NodeId::ROOT {
        return Err(Error::invalid("the document node cannot be removed"));
    }
    if doc.tree.detach(id) {
        tracing::trace!("removed {}", id);
    }
    Ok(())
}

/// Parent of `reference`, or `NoParent` for the root and detached nodes
fn parent_of(doc: &Document, reference: NodeId, new_node: NodeId) -> Result<NodeId> {
    for id in [reference, new_node] {
        if doc.tree.get(id).is_none() {
            return Err(Error::not_found(format!("node {id}")));
        }
    }
    doc.tree.parent(reference).ok_or(Error::NoParent)
}

/// Insert `new_node` as the previous sibling of `reference`
pub fn insert_before(doc: &mut Document, reference: NodeId, new_node: NodeId) -> Result<()> {
    let parent = parent_of(doc, reference, new_node)?;
    doc.tree.insert_before(parent, new_node, Some(reference))?;
    Ok(())
}

/// Insert `new_node` as the next sibling of `reference`
pub fn insert_after(doc: &mut Document, reference: NodeId, new_node: NodeId) -> Result<()> {
    let parent = parent_of(doc, reference, new_node)?;
    if new_node == reference {
        return Ok(());
    }
    let next = doc
        .tree
        .get(reference)
        .map(|node| node.next_sibling)
        .filter(|next| next.is_valid());
    doc.tree.insert_before(parent, new_node, next)?;
    Ok(())
}
