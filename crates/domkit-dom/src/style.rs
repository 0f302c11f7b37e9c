//! Inline Style
//!
//! `CSSStyleDeclaration` view over an element's `style` attribute.
//! The attribute stays the single source of truth: every write parses
//! it, updates one declaration and serializes it back.

use crate::{DomError, DomResult, DomTree, NodeId};

/// Ordered inline declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name: value; name: value` text, skipping malformed entries
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for entry in split_declarations(text) {
            let Some((name, value)) = entry.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if is_property_name(name) && !value.is_empty() {
                style.set_property(name, value);
            }
        }
        style
    }

    /// Get a property value
    pub fn get_property(&self, name: &str) -> Option<&str> {
        let name = normalize(name);
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it
    ///
    /// Returns `false` when the name is not a property name, or the value
    /// would end the declaration early, and the write was ignored.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        if !is_property_name(name) || !is_declaration_value(value) {
            return false;
        }
        let value = value.trim();
        if value.is_empty() {
            self.remove_property(name);
            return true;
        }

        let name = normalize(name);
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
        true
    }

    /// Remove a property, returning its value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = normalize(name);
        let index = self.declarations.iter().position(|(n, _)| *n == name)?;
        Some(self.declarations.remove(index).1)
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate declarations in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize to `style` attribute text
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Custom properties keep their case; everything else is ASCII-insensitive
fn normalize(name: &str) -> String {
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

/// CSS identifier shape: letters, digits, `-`, `_`, not starting with a digit
fn is_property_name(name: &str) -> bool {
    let (body, custom) = match name.strip_prefix("--") {
        Some(rest) => (rest, true),
        None => (name.strip_prefix('-').unwrap_or(name), false),
    };
    let mut chars = body.chars();
    let first = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_' || (custom && c.is_ascii_digit()),
        None => false,
    };
    first && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Split declaration list text on `;` outside strings and brackets
fn split_declarations(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut scanner = ValueScanner::default();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if scanner.feed(c) {
            entries.push(&text[start..i]);
            start = i + 1;
        }
    }
    entries.push(&text[start..]);
    entries
}

/// A value fits in one declaration: no top-level `;` and balanced
/// quotes and brackets
fn is_declaration_value(value: &str) -> bool {
    let mut scanner = ValueScanner::default();
    for c in value.chars() {
        if scanner.feed(c) {
            return false;
        }
    }
    scanner.is_balanced()
}

/// Tracks string and bracket nesting across a declaration
#[derive(Default)]
struct ValueScanner {
    quote: Option<char>,
    escaped: bool,
    depth: usize,
    unbalanced: bool,
}

impl ValueScanner {
    /// Feed one character; returns `true` for a top-level `;`
    fn feed(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match (self.quote, c) {
            (_, '\\') => self.escaped = true,
            (Some(q), c) if c == q => self.quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => self.quote = Some(c),
            (None, '(' | '[' | '{') => self.depth += 1,
            (None, ')' | ']' | '}') => match self.depth.checked_sub(1) {
                Some(depth) => self.depth = depth,
                None => self.unbalanced = true,
            },
            (None, ';') => return self.depth == 0,
            _ => {}
        }
        false
    }

    fn is_balanced(&self) -> bool {
        self.quote.is_none() && self.depth == 0 && !self.unbalanced && !self.escaped
    }
}

impl DomTree {
    /// Parsed inline style of an element
    pub fn style(&self, id: NodeId) -> DomResult<StyleDeclaration> {
        let element = self.element(id).ok_or(DomError::InvalidNodeType(id))?;
        Ok(StyleDeclaration::parse(element.get_attr("style").unwrap_or_default()))
    }

    /// Set one inline style property, keeping the `style` attribute in sync
    ///
    /// Returns `false` when the host ignored the property name.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<bool> {
        let mut style = self.style(id)?;
        if !style.set_property(name, value) {
            tracing::trace!("ignoring style {:?}: {:?} on {}", name, value, id);
            return Ok(false);
        }
        self.write_style(id, &style)?;
        Ok(true)
    }

    /// Remove one inline style property
    pub fn remove_style_property(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let mut style = self.style(id)?;
        let removed = style.remove_property(name);
        if removed.is_some() {
            self.write_style(id, &style)?;
        }
        Ok(removed)
    }

    fn write_style(&mut self, id: NodeId, style: &StyleDeclaration) -> DomResult<()> {
        let element = self.element_mut(id).ok_or(DomError::InvalidNodeType(id))?;
        if style.is_empty() {
            element.remove_attr("style");
        } else {
            element.set_attr("style", style.to_css_text());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_text() {
        let style = StyleDeclaration::parse("color: red; Margin-Top:4px;;junk; --Accent: #fff");
        assert_eq!(style.len(), 3);
        assert_eq!(style.get_property("color"), Some("red"));
        assert_eq!(style.get_property("margin-top"), Some("4px"));
        assert_eq!(style.get_property("--Accent"), Some("#fff"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut style = StyleDeclaration::new();
        style.set_property("color", "red");
        style.set_property("color", "blue");
        assert_eq!(style.len(), 1);
        assert_eq!(style.to_css_text(), "color: blue;");
    }

    #[test]
    fn test_invalid_names_ignored() {
        let mut style = StyleDeclaration::new();
        assert!(!style.set_property("not a property", "1"));
        assert!(!style.set_property("9lives", "1"));
        assert!(!style.set_property("", "1"));
        assert!(style.set_property("-webkit-appearance", "none"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn test_value_cannot_start_new_declaration() {
        let mut style = StyleDeclaration::new();
        assert!(!style.set_property("color", "red; display: none"));
        assert!(!style.set_property("color", "url(a"));
        assert!(!style.set_property("color", "\"open"));
        assert!(style.is_empty());

        assert!(style.set_property("content", "\"a;b\""));
        assert!(style.set_property("background", "url(x;y.png)"));
        let reparsed = StyleDeclaration::parse(&style.to_css_text());
        assert_eq!(reparsed, style);
        assert_eq!(reparsed.get_property("display"), None);
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = StyleDeclaration::parse("display: none; color: red");
        style.set_property("display", "");
        assert_eq!(style.to_css_text(), "color: red;");
    }

    #[test]
    fn test_tree_style_sync() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");

        assert!(tree.set_style_property(div, "opacity", "0.5").unwrap());
        assert_eq!(tree.attr(div, "style"), Some("opacity: 0.5;"));

        assert_eq!(tree.remove_style_property(div, "opacity").unwrap(), Some("0.5".to_string()));
        assert_eq!(tree.attr(div, "style"), None);
    }

    #[test]
    fn test_tree_style_rejects_injected_declaration() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert!(!tree.set_style_property(div, "color", "red; display: none").unwrap());
        assert_eq!(tree.attr(div, "style"), None);
    }

    #[test]
    fn test_style_on_text_node() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        assert_eq!(tree.set_style_property(text, "color", "red"), Err(DomError::InvalidNodeType(text)));
    }
}
