//! Element Query and Methods
//!
//! querySelector, querySelectorAll, closest, matches.

use crate::{DomTree, NodeId, SelectorError, SelectorList};

/// Element query trait
pub trait ElementQuery {
    /// First descendant of `root` matching the selector, in document order
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// All descendants of `root` matching the selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;
}

impl DomTree {
    /// Descendants of `root` matching a pre-parsed selector list
    pub fn select(&self, root: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| selectors.matches(self, id))
            .collect()
    }

    /// First descendant of `root` matching a pre-parsed selector list
    pub fn select_first(&self, root: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| selectors.matches(self, id))
    }
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(self.select_first(root, &selectors))
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(self.select(root, &selectors))
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(std::iter::once(element)
            .chain(self.ancestors(element))
            .find(|&id| selectors.matches(self, id)))
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let selectors = SelectorList::parse(selector)?;
        Ok(selectors.matches(self, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let nav = tree.create_element("nav");
        let first = tree.create_element("a");
        let second = tree.create_element("a");

        tree.append_child(tree.root(), nav).unwrap();
        tree.append_child(nav, first).unwrap();
        tree.append_child(nav, second).unwrap();
        tree.element_mut(second).unwrap().set_attr("class", "active");

        (tree, nav, first, second)
    }

    #[test]
    fn test_query_selector_document_order() {
        let (tree, _, first, second) = tree();

        assert_eq!(tree.query_selector(tree.root(), "a").unwrap(), Some(first));
        assert_eq!(tree.query_selector_all(tree.root(), "a").unwrap(), vec![first, second]);
        assert_eq!(tree.query_selector(tree.root(), ".active").unwrap(), Some(second));
    }

    #[test]
    fn test_scope_excludes_root() {
        let (tree, nav, _, _) = tree();
        assert_eq!(tree.query_selector(nav, "nav").unwrap(), None);
    }

    #[test]
    fn test_scope_matches_whole_document() {
        let (tree, nav, first, second) = tree();
        assert_eq!(tree.query_selector_all(nav, "nav > a").unwrap(), vec![first, second]);
    }

    #[test]
    fn test_closest() {
        let (tree, nav, first, _) = tree();
        assert_eq!(tree.closest(first, "nav").unwrap(), Some(nav));
        assert_eq!(tree.closest(first, "a").unwrap(), Some(first));
        assert_eq!(tree.closest(first, "section").unwrap(), None);
    }

    #[test]
    fn test_invalid_selector() {
        let (tree, _, first, _) = tree();
        assert!(tree.matches(first, "a[").is_err());
    }
}
