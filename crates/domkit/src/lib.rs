//! domkit - DOM convenience helpers
//!
//! A flat set of free functions over a host [`Document`] or [`Window`]:
//! selection with presence checks, attribute and data readers, inline
//! style and visibility, scrolling, custom events, a selector-bound
//! element handle and a JSON store persisted in localStorage or cookies.
//!
//! Every helper borrows the host value it works on; nothing is global and
//! nothing is asynchronous.
//!
//! ```no_run
//! use domkit::{Document, ScrollOptions, Window};
//!
//! # fn main() -> domkit::Result<()> {
//! let mut win = Window::new(Document::default());
//! let body = domkit::select_one(win.document(), "body")?;
//! domkit::hide(win.document_mut(), body)?;
//! domkit::scroll_to_top(&mut win, ScrollOptions::new(100.0, false));
//! # Ok(())
//! # }
//! ```

mod error;
mod config;
mod select;
mod attrs;
mod style;
pub mod fade;
mod tree;
mod scroll;
mod events;
mod handle;
mod store;

pub use error::{Error, Result};
pub use config::{CustomEventInit, FadeOptions, ScrollOptions, StoreConfig, StoreType};
pub use select::{exists, exists_within, select_all, select_all_within, select_one, select_one_within};
pub use attrs::{DataValue, get_all_data, get_attributes, get_data, set_attributes, set_data};
pub use style::{apply_styles, hide, is_hidden, show, toggle};
pub use fade::{FadeDirection, FadeState, OpacityFade};
pub use tree::{insert_after, insert_before, remove};
pub use scroll::{distance_from_top, scroll_to_element, scroll_to_top};
pub use events::{listen, trigger, trigger_with, unlisten};
pub use handle::ElementHandle;
pub use store::Store;

pub use domkit_dom::{CustomEvent, Document, ListenerId, NodeId, Window};
