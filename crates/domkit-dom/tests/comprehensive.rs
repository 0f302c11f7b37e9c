//! Host environment tests for domkit-dom
//!
//! Builds documents by hand and exercises selectors, inline style,
//! events, storage and cookies together.

use std::cell::RefCell;
use std::rc::Rc;

use domkit_dom::{
    Cookie, CookieJar, CustomEvent, Document, ElementQuery, NodeId, PersistentSlots, ScrollBehavior,
    ScrollToOptions, SelectorList, Storage, Window,
};
use serde_json::json;

fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.tree.create_element(tag);
    for (name, value) in attrs {
        doc.tree.element_mut(id).unwrap().set_attr(name, *value);
    }
    doc.tree.append_child(parent, id).unwrap();
    id
}

/// body > article#post > (h1, p.lead, p, footer > a[href^=https])
fn article() -> (Document, Vec<NodeId>) {
    let mut doc = Document::default();
    let body = doc.body();
    let post = element(&mut doc, body, "article", &[("id", "post")]);
    let h1 = element(&mut doc, post, "h1", &[]);
    let lead = element(&mut doc, post, "p", &[("class", "lead intro")]);
    let p = element(&mut doc, post, "p", &[("lang", "en-GB")]);
    let footer = element(&mut doc, post, "footer", &[]);
    let link = element(&mut doc, footer, "a", &[("href", "https://example.com")]);
    (doc, vec![post, h1, lead, p, footer, link])
}

// ============================================================================
// SELECTORS
// ============================================================================

#[test]
fn test_selector_forms() {
    let (doc, ids) = article();
    let (post, h1, lead, p, footer, link) = (ids[0], ids[1], ids[2], ids[3], ids[4], ids[5]);

    let one = |s: &str| doc.query_selector(s).unwrap();
    assert_eq!(one("#post > h1"), Some(h1));
    assert_eq!(one("h1 + p"), Some(lead));
    assert_eq!(one("h1 ~ footer"), Some(footer));
    assert_eq!(one("p.lead.intro"), Some(lead));
    assert_eq!(one("[lang|=en]"), Some(p));
    assert_eq!(one("a[href^=https]"), Some(link));
    assert_eq!(one("article p:not(.lead)"), Some(p));
    assert_eq!(one("#post > :nth-child(2)"), Some(lead));
    assert_eq!(one("#post > :last-child"), Some(footer));
    assert_eq!(one("footer:only-child"), None);
    assert_eq!(one("html:root"), Some(doc.document_element()));
    assert_eq!(one("section"), None);
    assert!(doc.query_selector_all("article, p").unwrap().starts_with(&[post]));
}

#[test]
fn test_closest_and_matches() {
    let (doc, ids) = article();
    let link = ids[5];
    let list = SelectorList::parse("article").unwrap();

    assert_eq!(doc.tree.closest(link, "article").unwrap(), Some(ids[0]));
    assert!(doc.tree.matches(link, "footer > a").unwrap());
    assert!(list.matches(&doc.tree, ids[0]));
    assert!(!list.matches(&doc.tree, link));
}

// ============================================================================
// STYLE
// ============================================================================

#[test]
fn test_style_attribute_round_trip() {
    let (mut doc, ids) = article();
    let h1 = ids[1];

    assert!(doc.tree.set_style_property(h1, "Color", "red").unwrap());
    assert!(doc.tree.set_style_property(h1, "--gap", "4px").unwrap());
    assert!(!doc.tree.set_style_property(h1, "9lives", "x").unwrap());
    assert_eq!(doc.tree.attr(h1, "style"), Some("color: red; --gap: 4px;"));

    assert_eq!(doc.tree.remove_style_property(h1, "color").unwrap(), Some("red".into()));
    assert_eq!(doc.tree.remove_style_property(h1, "--gap").unwrap(), Some("4px".into()));
    assert_eq!(doc.tree.attr(h1, "style"), None);
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_dispatch_order_along_path() {
    let (mut doc, ids) = article();
    let (post, link) = (ids[0], ids[5]);
    let order = Rc::new(RefCell::new(Vec::new()));

    for target in [NodeId::ROOT, post, link] {
        let order = Rc::clone(&order);
        doc.add_event_listener(target, "open", move |e| order.borrow_mut().push(e.current_target()))
            .unwrap();
    }

    let event = CustomEvent::new("open", link, json!(null));
    assert!(doc.dispatch_event(&event).unwrap());
    assert_eq!(*order.borrow(), vec![link, post, NodeId::ROOT]);
    assert_eq!(event.current_target(), link);
}

// ============================================================================
// WINDOW, STORAGE AND COOKIES
// ============================================================================

#[test]
fn test_window_keeps_storage_across_documents() {
    let mut win = Window::new(Document::default());
    win.local_storage_mut().set_item("k", "v").unwrap();
    win.cookies_mut().set(Cookie::new("sid", "abc"));
    win.scroll_to(ScrollToOptions::top(10.0, ScrollBehavior::Smooth));

    let (doc, _) = article();
    win.replace_document(doc);
    assert_eq!(win.local_storage().get_item("k"), Some("v"));
    assert_eq!(win.cookies().get("sid"), Some("abc"));
    assert_eq!(win.scroll_y(), 0.0);
    assert!(win.document().get_element_by_id("post").is_some());
}

#[test]
fn test_local_storage_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ls.json");

    let mut storage = Storage::local(&path).unwrap();
    storage.write_slot("a", "1").unwrap();
    storage.write_slot("b", "2").unwrap();
    assert!(storage.erase_slot("a").unwrap());
    assert!(!storage.erase_slot("a").unwrap());

    let reopened = Storage::local(&path).unwrap();
    assert_eq!(reopened.read_slot("b").as_deref(), Some("2"));
    assert_eq!(reopened.length(), 1);
}

#[test]
fn test_cookie_slots_encode_meta_characters() {
    let mut jar = CookieJar::new();
    jar.write_slot("prefs", r#"{"a": "x; y=z"}"#).unwrap();

    assert!(!jar.cookie_string().contains("x; y"));
    assert_eq!(jar.read_slot("prefs").as_deref(), Some(r#"{"a": "x; y=z"}"#));

    jar.set_cookie_string("prefs=; max-age=0");
    assert!(jar.read_slot("prefs").is_none());
}
