//! domkit DOM - host environment
//!
//! Arena-based document tree plus the pieces of a browser window the
//! helper layer talks to: viewport scrolling, persistent string storage,
//! a cookie jar and same-thread custom event listeners.

mod node;
mod tree;
mod operations;
mod document;
mod element;
mod selector;
mod style;
mod dataset;
mod geometry;
mod events;
mod storage;
mod cookies;
mod window;

pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::DomTree;
pub use operations::{DomError, DomResult};
pub use document::Document;
pub use element::ElementQuery;
pub use selector::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, Compound, NthExpression,
    PseudoClass, SelectorComponent, SelectorError, SelectorList,
};
pub use style::StyleDeclaration;
pub use dataset::{DATA_PREFIX, Dataset, attr_name_to_key, key_to_attr_name, to_kebab_case};
pub use geometry::{DOMRect, ScrollBehavior, ScrollToOptions};
pub use events::{CustomEvent, EventListeners, Listener, ListenerId};
pub use storage::{PersistentSlots, Storage, StorageError};
pub use cookies::{Cookie, CookieJar, decode_cookie_value, encode_cookie_value};
pub use window::{SCROLL_LOG_CAPACITY, ScrollRequest, Viewport, Window};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}
