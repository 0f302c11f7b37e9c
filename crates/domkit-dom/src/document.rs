//! Document - High-level document API

use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    CustomEvent, DOMRect, DomError, DomResult, DomTree, ElementQuery, EventListeners, ListenerId,
    NodeId,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Host-provided layout boxes in document coordinates
    layout: HashMap<NodeId, DOMRect>,
    /// Custom event listeners
    listeners: EventListeners,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut document = Self::empty(url);
        let tree = &mut document.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(NodeId::ROOT, html).ok();
        tree.append_child(html, head).ok();
        tree.append_child(html, body).ok();

        document.finalize();
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            layout: HashMap::new(),
            listeners: EventListeners::new(),
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let html = tree
            .element_children(NodeId::ROOT)
            .find(|&id| tree.element(id).is_some_and(|e| e.tag == "html"));
        let child = |tag: &str| {
            html.and_then(|h| {
                tree.element_children(h)
                    .find(|&id| tree.element(id).is_some_and(|e| e.tag == tag))
            })
        };

        self.head_element = child("head").unwrap_or(NodeId::NONE);
        self.body_element = child("body").unwrap_or(NodeId::NONE);
        self.html_element = html.unwrap_or(NodeId::NONE);
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .find(|&id| self.tree.element(id).is_some_and(|e| e.tag == "title"))
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .find(|&node| self.tree.element(node).is_some_and(|e| e.id() == Some(id)))
    }

    /// First element in the document matching a selector
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, crate::SelectorError> {
        self.tree.query_selector(NodeId::ROOT, selector)
    }

    /// All elements in the document matching a selector
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, crate::SelectorError> {
        self.tree.query_selector_all(NodeId::ROOT, selector)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // === Geometry ===

    /// Record the layout box of an element (document coordinates)
    pub fn set_layout_rect(&mut self, id: NodeId, rect: DOMRect) -> DomResult<()> {
        if !self.tree.is_element(id) {
            return Err(DomError::InvalidNodeType(id));
        }
        self.layout.insert(id, rect);
        Ok(())
    }

    /// Layout box of an element; elements without layout report an empty rect
    pub fn layout_rect(&self, id: NodeId) -> DomResult<DOMRect> {
        if !self.tree.is_element(id) {
            return Err(DomError::InvalidNodeType(id));
        }
        if !self.is_rendered(id) {
            return Ok(DOMRect::new());
        }
        Ok(self.layout.get(&id).copied().unwrap_or_default())
    }

    /// Connected, with no `hidden` element on the path up to the document
    fn is_rendered(&self, id: NodeId) -> bool {
        self.tree.is_connected(id)
            && !std::iter::once(id)
                .chain(self.tree.ancestors(id))
                .any(|n| self.tree.element(n).is_some_and(|e| e.has_attr("hidden")))
    }

    /// Bottom edge of the lowest laid-out element
    pub fn content_height(&self) -> f64 {
        self.layout
            .iter()
            .filter(|(id, _)| self.is_rendered(**id))
            .map(|(_, rect)| rect.bottom())
            .fold(0.0, f64::max)
    }

    // === Events ===

    /// Register a custom event listener on an element or the document
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        name: &str,
        callback: impl Fn(&CustomEvent) + 'static,
    ) -> DomResult<ListenerId> {
        let node = self.tree.get(target).ok_or(DomError::NotFound(target))?;
        if !node.is_container() {
            return Err(DomError::InvalidNodeType(target));
        }
        Ok(self.listeners.add(target, name, Rc::new(callback)))
    }

    /// Remove a listener
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Dispatch an event along its target's ancestor path
    ///
    /// Returns `false` if a listener cancelled it.
    pub fn dispatch_event(&self, event: &CustomEvent) -> DomResult<bool> {
        let target = event.target();
        if self.tree.get(target).is_none() {
            return Err(DomError::NotFound(target));
        }
        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.tree.ancestors(target))
            .collect();
        tracing::trace!("dispatching {:?} on {} ({} nodes)", event.name(), target, path.len());
        Ok(self.listeners.dispatch(event, &path))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
