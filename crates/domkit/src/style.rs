//! Style and visibility mutators

use domkit_dom::{Document, NodeId, to_kebab_case};

use crate::{Error, Result};

const HIDDEN: &str = "hidden";

/// CSS property name for a style key; `fontSize` and `font-size` both work
fn property_name(key: &str) -> String {
    if key.starts_with("--") {
        key.to_string()
    } else {
        to_kebab_case(key)
    }
}

/// Merge style entries into the element's inline style
///
/// Entries are written in iteration order, so a later entry for the same
/// property wins. Names the host cannot use are dropped without error.
pub fn apply_styles<I, K, V>(doc: &mut Document, id: NodeId, styles: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if !doc.tree.is_element(id) {
        return Err(Error::not_found(format!("element {id}")));
    }
    for (name, value) in styles {
        let property = property_name(name.as_ref());
        doc.tree.set_style_property(id, &property, value.as_ref())?;
    }
    Ok(())
}

fn element_mut(doc: &mut Document, id: NodeId) -> Result<&mut domkit_dom::ElementData> {
    doc.tree
        .element_mut(id)
        .ok_or_else(|| Error::not_found(format!("element {id}")))
}

/// Set the `hidden` flag
pub fn hide(doc: &mut Document, id: NodeId) -> Result<()> {
    let element = element_mut(doc, id)?;
    if !element.has_attr(HIDDEN) {
        element.set_attr(HIDDEN, "");
    }
    Ok(())
}

/// Clear the `hidden` flag
pub fn show(doc: &mut Document, id: NodeId) -> Result<()> {
    element_mut(doc, id)?.remove_attr(HIDDEN);
    Ok(())
}

pub fn is_hidden(doc: &Document, id: NodeId) -> Result<bool> {
    doc.tree
        .element(id)
        .map(|element| element.has_attr(HIDDEN))
        .ok_or_else(|| Error::not_found(format!("element {id}")))
}

/// Flip the `hidden` flag, returning whether the element is now hidden
pub fn toggle(doc: &mut Document, id: NodeId) -> Result<bool> {
    if is_hidden(doc, id)? {
        show(doc, id)?;
        Ok(false)
    } else {
        hide(doc, id)?;
        Ok(true)
    }
}
