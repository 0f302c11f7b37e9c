//! Scroll helpers

use domkit_dom::{NodeId, ScrollBehavior, ScrollToOptions, Window};

use crate::{Error, Result, ScrollOptions};

fn behavior(options: &ScrollOptions) -> ScrollBehavior {
    if options.smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    }
}

/// Top edge of an element in document coordinates
pub fn distance_from_top(win: &Window, id: NodeId) -> Result<f64> {
    if !win.document().tree.is_element(id) {
        return Err(Error::not_found(format!("element {id}")));
    }
    let rect = win.bounding_client_rect(id)?;
    Ok(rect.top() + win.scroll_y())
}

/// Scroll so the element sits `options.top_offset` below the viewport top
///
/// The request is fire-and-forget: once the element is known this always
/// reports `true`.
pub fn scroll_to_element(win: &mut Window, id: NodeId, options: ScrollOptions) -> Result<bool> {
    let top = distance_from_top(win, id)? - options.top_offset;
    win.scroll_to(ScrollToOptions::top(top, behavior(&options)));
    Ok(true)
}

/// Scroll to `options.top_offset` from the document origin
pub fn scroll_to_top(win: &mut Window, options: ScrollOptions) -> bool {
    win.scroll_to(ScrollToOptions::top(options.top_offset, behavior(&options)));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use domkit_dom::{DOMRect, Document};

    fn window() -> (Window, NodeId) {
        let mut doc = Document::default();
        let section = doc.tree.create_element("section");
        doc.tree.append_child(doc.body(), section).unwrap();
        doc.set_layout_rect(section, DOMRect::from_xywh(0.0, 1200.0, 800.0, 600.0))
            .unwrap();
        doc.set_layout_rect(doc.body(), DOMRect::from_xywh(0.0, 0.0, 800.0, 4000.0))
            .unwrap();
        (Window::new(doc), section)
    }

    #[test]
    fn test_distance_ignores_scroll_position() {
        let (mut win, section) = window();
        assert_eq!(distance_from_top(&win, section).unwrap(), 1200.0);

        scroll_to_top(&mut win, ScrollOptions::new(300.0, false));
        assert_eq!(distance_from_top(&win, section).unwrap(), 1200.0);
    }

    #[test]
    fn test_scroll_to_element_with_offset() {
        let (mut win, section) = window();
        assert!(scroll_to_element(&mut win, section, ScrollOptions::new(100.0, true)).unwrap());

        let request = win.last_scroll_request().unwrap();
        assert_eq!(request.top, 1100.0);
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        assert_eq!(win.scroll_y(), 1100.0);
    }

    #[test]
    fn test_scroll_to_top_instant() {
        let (mut win, _) = window();
        assert!(scroll_to_top(&mut win, ScrollOptions::new(100.0, false)));

        let request = win.last_scroll_request().unwrap();
        assert_eq!(request.top, 100.0);
        assert_eq!(request.behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn test_default_options_are_smooth() {
        let (mut win, _) = window();
        scroll_to_top(&mut win, ScrollOptions::default());
        assert_eq!(win.last_scroll_request().unwrap().behavior, ScrollBehavior::Smooth);
        assert_eq!(win.scroll_y(), 0.0);
    }

    #[test]
    fn test_unknown_element() {
        let (mut win, _) = window();
        let text = win.document_mut().tree.create_text("x");
        assert!(distance_from_top(&win, text).unwrap_err().is_not_found());
        assert!(scroll_to_element(&mut win, text, ScrollOptions::default()).is_err());
        assert!(win.scroll_requests().is_empty());
    }
}
