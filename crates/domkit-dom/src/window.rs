//! Window
//!
//! Owns the document together with the per-window state the helpers
//! touch: viewport scroll position, localStorage and the cookie jar.

use crate::{CookieJar, DOMRect, Document, DomResult, NodeId, ScrollBehavior, ScrollToOptions, Storage};

/// Viewport scroll state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Scroll requests kept before the oldest are dropped
pub const SCROLL_LOG_CAPACITY: usize = 256;

/// A scroll request as issued, before clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub left: f64,
    pub behavior: ScrollBehavior,
}

/// Browser window
#[derive(Debug)]
pub struct Window {
    document: Document,
    viewport: Viewport,
    scroll_requests: Vec<ScrollRequest>,
    local_storage: Storage,
    cookies: CookieJar,
}

impl Window {
    /// Window over a document with in-memory storage
    pub fn new(document: Document) -> Self {
        Self::with_storage(document, Storage::session())
    }

    /// Window with a caller-provided localStorage backend
    pub fn with_storage(document: Document, local_storage: Storage) -> Self {
        Self {
            document,
            viewport: Viewport::default(),
            scroll_requests: Vec::new(),
            local_storage,
            cookies: CookieJar::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Replace the document, keeping storage and cookies
    pub fn replace_document(&mut self, document: Document) -> Document {
        self.viewport.scroll_x = 0.0;
        self.viewport.scroll_y = 0.0;
        std::mem::replace(&mut self.document, document)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the viewport
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width.max(0.0);
        self.viewport.height = height.max(0.0);
        self.clamp_scroll();
    }

    /// `window.scrollX`
    pub fn scroll_x(&self) -> f64 {
        self.viewport.scroll_x
    }

    /// `window.scrollY`
    pub fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    /// `window.scrollTo(options)`
    ///
    /// The host does not animate: smooth requests land on the target
    /// immediately, but the requested behavior is kept in the log.
    pub fn scroll_to(&mut self, options: ScrollToOptions) {
        let request = ScrollRequest {
            top: options.top.unwrap_or(self.viewport.scroll_y),
            left: options.left.unwrap_or(self.viewport.scroll_x),
            behavior: options.behavior,
        };
        tracing::debug!(
            "scrollTo top={} left={} behavior={:?}",
            request.top,
            request.left,
            request.behavior
        );

        if self.scroll_requests.len() == SCROLL_LOG_CAPACITY {
            self.scroll_requests.remove(0);
        }
        self.scroll_requests.push(request);
        self.viewport.scroll_y = request.top;
        self.viewport.scroll_x = request.left;
        self.clamp_scroll();
    }

    /// Logged scroll requests, oldest first
    ///
    /// Holds at most [`SCROLL_LOG_CAPACITY`] entries.
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    /// Drain the scroll request log
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.scroll_requests)
    }

    /// Most recent scroll request
    pub fn last_scroll_request(&self) -> Option<&ScrollRequest> {
        self.scroll_requests.last()
    }

    /// Largest reachable vertical scroll offset
    pub fn max_scroll_y(&self) -> f64 {
        (self.document.content_height() - self.viewport.height).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll_y();
        self.viewport.scroll_y = self.viewport.scroll_y.clamp(0.0, max_y);
        self.viewport.scroll_x = self.viewport.scroll_x.max(0.0);
    }

    /// `element.getBoundingClientRect()`: layout box relative to the viewport
    pub fn bounding_client_rect(&self, id: NodeId) -> DomResult<DOMRect> {
        let rect = self.document.layout_rect(id)?;
        Ok(rect.translated(-self.viewport.scroll_x, -self.viewport.scroll_y))
    }

    /// `window.localStorage`
    pub fn local_storage(&self) -> &Storage {
        &self.local_storage
    }

    pub fn local_storage_mut(&mut self) -> &mut Storage {
        &mut self.local_storage
    }

    /// `document.cookie` jar
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn cookies_mut(&mut self) -> &mut CookieJar {
        &mut self.cookies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tall_window() -> (Window, NodeId) {
        let mut doc = Document::default();
        let section = doc.tree.create_element("section");
        doc.tree.append_child(doc.body(), section).unwrap();
        doc.set_layout_rect(section, DOMRect::from_xywh(0.0, 1500.0, 800.0, 1000.0))
            .unwrap();
        (Window::new(doc), section)
    }

    #[test]
    fn test_scroll_to_records_and_moves() {
        let (mut win, _) = tall_window();
        win.scroll_to(ScrollToOptions::top(400.0, ScrollBehavior::Instant));

        assert_eq!(win.scroll_y(), 400.0);
        assert_eq!(
            win.last_scroll_request(),
            Some(&ScrollRequest {
                top: 400.0,
                left: 0.0,
                behavior: ScrollBehavior::Instant
            })
        );
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let (mut win, _) = tall_window();
        win.scroll_to(ScrollToOptions::top(10_000.0, ScrollBehavior::Smooth));
        assert_eq!(win.scroll_y(), 2500.0 - 720.0);

        win.scroll_to(ScrollToOptions::top(-50.0, ScrollBehavior::Auto));
        assert_eq!(win.scroll_y(), 0.0);
        assert_eq!(win.scroll_requests().len(), 2);
    }

    #[test]
    fn test_scroll_log_is_bounded_and_drainable() {
        let (mut win, _) = tall_window();
        for top in 0..SCROLL_LOG_CAPACITY + 10 {
            win.scroll_to(ScrollToOptions::top(top as f64, ScrollBehavior::Auto));
        }

        assert_eq!(win.scroll_requests().len(), SCROLL_LOG_CAPACITY);
        assert_eq!(win.scroll_requests()[0].top, 10.0);

        let drained = win.take_scroll_requests();
        assert_eq!(drained.len(), SCROLL_LOG_CAPACITY);
        assert_eq!(drained.last().map(|r| r.top), Some((SCROLL_LOG_CAPACITY + 9) as f64));
        assert!(win.scroll_requests().is_empty());
        assert!(win.last_scroll_request().is_none());
    }

    #[test]
    fn test_bounding_client_rect_follows_scroll() {
        let (mut win, section) = tall_window();
        assert_eq!(win.bounding_client_rect(section).unwrap().top(), 1500.0);

        win.scroll_to(ScrollToOptions::top(500.0, ScrollBehavior::Instant));
        assert_eq!(win.bounding_client_rect(section).unwrap().top(), 1000.0);
    }
}
