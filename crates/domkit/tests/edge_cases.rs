//! Edge case tests for domkit
//!
//! Argument validation, stale node ids and corrupt persisted data.

use domkit::{DataValue, Document, ElementHandle, Error, NodeId, ScrollOptions, Store, StoreConfig, StoreType, Window};
use domkit_dom::{DOMRect, ScrollBehavior, Storage, encode_cookie_value};
use serde_json::json;

fn doc(html: &str) -> Document {
    domkit_html::parse(html).unwrap()
}

// ============================================================================
// SELECTORS
// ============================================================================

#[test]
fn test_blank_and_malformed_selectors() {
    let doc = doc("<p>x</p>");
    for selector in ["", "   ", "p[", "p >", ">> p", ":hover-ish"] {
        assert!(
            matches!(domkit::select_one(&doc, selector), Err(Error::InvalidArgument(_))),
            "{selector:?}"
        );
        assert!(!domkit::exists(&doc, &[selector]));
    }
}

#[test]
fn test_exists_with_no_selectors_is_true() {
    let doc = doc("");
    assert!(domkit::exists::<&str>(&doc, &[]));
    assert!(domkit::exists(&doc, Vec::<String>::new().as_slice()));
}

#[test]
fn test_scope_must_be_a_container() {
    let mut doc = doc("<p>x</p>");
    let text = doc.tree_mut().create_text("loose");
    assert!(matches!(domkit::select_all_within(&doc, text, "p"), Err(Error::InvalidArgument(_))));

    let stale = NodeId::NONE;
    assert!(domkit::select_one_within(&doc, stale, "p").unwrap_err().is_not_found());
    assert!(!domkit::exists_within(&doc, stale, &["p"]));
}

#[test]
fn test_scope_excludes_target_itself() {
    let doc = doc(r#"<div class="box"><div class="box" id="inner"></div></div>"#);
    let outer = domkit::select_one(&doc, ".box").unwrap();
    let inner = doc.get_element_by_id("inner").unwrap();

    assert_eq!(domkit::select_all_within(&doc, outer, ".box").unwrap(), vec![inner]);
    assert!(domkit::select_one_within(&doc, inner, ".box").unwrap_err().is_not_found());
}

#[test]
fn test_detached_elements_are_not_selected() {
    let mut doc = doc("<ul><li id=a></li></ul>");
    let li = domkit::select_one(&doc, "#a").unwrap();
    domkit::remove(&mut doc, li).unwrap();
    assert!(domkit::select_one(&doc, "#a").unwrap_err().is_not_found());
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_data_names_are_case_folded_by_parser() {
    let doc = doc(r#"<div data-User-ID="7"></div>"#);
    let div = domkit::select_one(&doc, "div").unwrap();
    assert_eq!(domkit::get_data(&doc, div, "userId").unwrap(), DataValue::from("7"));
}

#[test]
fn test_set_attributes_rejects_empty_name() {
    let mut doc = doc("<div></div>");
    let div = domkit::select_one(&doc, "div").unwrap();
    let err = domkit::set_attributes(&mut doc, div, [("title", "ok"), ("", "bad")]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(doc.tree().attr(div, "title"), Some("ok"));
}

#[test]
fn test_readers_on_non_elements() {
    let mut doc = doc("<div></div>");
    let comment = doc.tree_mut().create_comment("c");
    assert!(domkit::get_all_data(&doc, comment).unwrap_err().is_not_found());
    assert!(domkit::get_data(&doc, NodeId::ROOT, "x").unwrap_err().is_not_found());
    assert!(domkit::is_hidden(&doc, comment).unwrap_err().is_not_found());
}

// ============================================================================
// STYLE
// ============================================================================

#[test]
fn test_empty_style_value_removes_property() {
    let mut doc = doc(r#"<div style="color: red"></div>"#);
    let div = domkit::select_one(&doc, "div").unwrap();
    domkit::apply_styles(&mut doc, div, [("color", "")]).unwrap();
    assert_eq!(doc.tree().attr(div, "style"), None);
}

#[test]
fn test_style_value_cannot_inject_declarations() {
    let mut doc = doc(r#"<div style="color: blue"></div>"#);
    let div = domkit::select_one(&doc, "div").unwrap();
    domkit::apply_styles(&mut doc, div, [("color", "red; display: none"), ("content", "\"a;b\"")]).unwrap();

    let style = doc.tree().style(div).unwrap();
    assert_eq!(style.get_property("color"), Some("blue"));
    assert_eq!(style.get_property("display"), None);
    assert_eq!(style.get_property("content"), Some("\"a;b\""));
}

#[test]
fn test_hidden_element_has_no_box() {
    let mut doc = doc("<section></section>");
    let section = domkit::select_one(&doc, "section").unwrap();
    doc.set_layout_rect(section, DOMRect::from_xywh(0.0, 900.0, 100.0, 100.0)).unwrap();
    domkit::hide(&mut doc, section).unwrap();

    let win = Window::new(doc);
    assert_eq!(domkit::distance_from_top(&win, section).unwrap(), 0.0);
}

#[test]
fn test_child_of_hidden_element_has_no_box() {
    let mut doc = doc("<section><p>x</p></section>");
    let section = domkit::select_one(&doc, "section").unwrap();
    let p = domkit::select_one(&doc, "section p").unwrap();
    doc.set_layout_rect(p, DOMRect::from_xywh(0.0, 900.0, 100.0, 20.0)).unwrap();
    domkit::hide(&mut doc, section).unwrap();

    let mut win = Window::new(doc);
    assert_eq!(domkit::distance_from_top(&win, p).unwrap(), 0.0);

    domkit::show(win.document_mut(), section).unwrap();
    assert_eq!(domkit::distance_from_top(&win, p).unwrap(), 900.0);
}

// ============================================================================
// SCROLL
// ============================================================================

#[test]
fn test_scroll_past_content_is_clamped_but_logged() {
    let mut doc = doc("<section></section>");
    let section = domkit::select_one(&doc, "section").unwrap();
    doc.set_layout_rect(section, DOMRect::from_xywh(0.0, 500.0, 100.0, 100.0)).unwrap();
    let mut win = Window::new(doc);

    assert!(domkit::scroll_to_element(&mut win, section, ScrollOptions::new(0.0, false)).unwrap());
    assert_eq!(win.last_scroll_request().unwrap().top, 500.0);
    assert_eq!(win.scroll_y(), 0.0);
}

#[test]
fn test_negative_offset_scrolls_past_element() {
    let mut win = Window::new(Document::default());
    domkit::scroll_to_top(&mut win, ScrollOptions::new(-20.0, true));
    let request = win.last_scroll_request().unwrap();
    assert_eq!(request.top, -20.0);
    assert_eq!(request.behavior, ScrollBehavior::Smooth);
    assert_eq!(win.scroll_y(), 0.0);
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_listeners_on_text_nodes_rejected() {
    let mut doc = doc("<p>x</p>");
    let text = doc.tree_mut().create_text("t");
    assert!(matches!(
        domkit::listen(&mut doc, text, "tap", |_| {}),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_trigger_on_stale_node() {
    let doc = doc("<p>x</p>");
    assert!(domkit::trigger(&doc, NodeId::NONE, "tap", ()).unwrap_err().is_not_found());
}

// ============================================================================
// HANDLE
// ============================================================================

#[test]
fn test_handle_with_invalid_sub_selector() {
    let doc = doc(r#"<form id="f"><input></form>"#);
    let handle = ElementHandle::new(&doc, "#f").unwrap();
    assert!(matches!(handle.get_sub(&doc, "input["), Err(Error::InvalidArgument(_))));
}

// ============================================================================
// STORE
// ============================================================================

#[test]
fn test_adopt_corrupt_local_storage() {
    let mut win = Window::new(Document::default());
    win.local_storage_mut().set_item("cart", "{\"items\": [").unwrap();

    let err = Store::open(&mut win, "cart", StoreConfig::adopting()).unwrap_err();
    assert!(err.is_corrupt());
    assert!(err.to_string().contains("cart"));

    // Without adopt the corrupt slot is simply flushed
    let store = Store::open(&mut win, "cart", StoreConfig::default()).unwrap();
    assert!(store.record().is_empty());
    assert!(win.local_storage().get_item("cart").is_none());
}

#[test]
fn test_adopt_non_object_cookie() {
    let mut win = Window::new(Document::default());
    win.cookies_mut()
        .set_cookie_string(&format!("cart={}", encode_cookie_value("\"just a string\"")));

    let config = StoreConfig::adopting().with_store_type(StoreType::Cookie);
    let err = Store::open(&mut win, "cart", config).unwrap_err();
    assert!(matches!(err, Error::CorruptData { source: None, .. }));
    assert!(err.to_string().ends_with("expected a JSON object, found a string"));
}

#[test]
fn test_stores_with_different_names_are_independent() {
    let mut win = Window::new(Document::default());
    let mut a = Store::open(&mut win, "a", StoreConfig::default()).unwrap();
    let mut b = Store::open(&mut win, "b", StoreConfig::default()).unwrap();
    a.store(&mut win, json!({"k": 1})).unwrap();
    b.store(&mut win, json!({"k": 2})).unwrap();

    a.flush(&mut win).unwrap();
    let b_again = Store::open(&mut win, "b", StoreConfig::adopting()).unwrap();
    assert_eq!(b_again.get("k"), Some(&json!(2)));
    assert_eq!(win.local_storage().length(), 1);
}

#[test]
fn test_storage_file_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut win = Window::with_storage(Document::default(), Storage::local(&path).unwrap());
    let mut store = Store::open(&mut win, "s", StoreConfig::default()).unwrap();

    std::fs::create_dir(&path).unwrap();
    let err = store.store(&mut win, json!({"x": 1})).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(store.get("x"), None);
    assert!(win.local_storage().get_item("s").is_none());
}

#[test]
fn test_store_accepts_serializable_structs() {
    #[derive(serde::Serialize)]
    struct Draft<'a> {
        subject: &'a str,
        attachments: u32,
    }

    let mut win = Window::new(Document::default());
    let mut store = Store::open(&mut win, "draft", StoreConfig::default()).unwrap();
    store
        .store(&mut win, Draft { subject: "hi", attachments: 2 })
        .unwrap();
    assert_eq!(store.get("attachments"), Some(&json!(2)));
}
