//! Custom event dispatch and listening

use domkit_dom::{CustomEvent, Document, ListenerId, NodeId};
use serde::Serialize;

use crate::{CustomEventInit, Error, Result};

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        Err(Error::invalid("event name must not be empty"))
    } else {
        Ok(())
    }
}

/// Listen for custom signal `name` on an element or the document
pub fn listen<F>(doc: &mut Document, target: NodeId, name: &str, callback: F) -> Result<ListenerId>
where
    F: Fn(&CustomEvent) + 'static,
{
    check_name(name)?;
    Ok(doc.add_event_listener(target, name, callback)?)
}

/// Stop listening; `false` if the listener was already gone
pub fn unlisten(doc: &mut Document, id: ListenerId) -> bool {
    doc.remove_event_listener(id)
}

/// Dispatch a bubbling, cancelable custom event carrying `payload`
///
/// Returns `false` if a listener cancelled the event.
pub fn trigger<T: Serialize>(doc: &Document, target: NodeId, name: &str, payload: T) -> Result<bool> {
    trigger_with(doc, target, name, payload, CustomEventInit::default())
}

/// Dispatch a custom event with explicit bubbling and cancel flags
pub fn trigger_with<T: Serialize>(
    doc: &Document,
    target: NodeId,
    name: &str,
    payload: T,
    init: CustomEventInit,
) -> Result<bool> {
    check_name(name)?;
    let detail = serde_json::to_value(payload)
        .map_err(|e| Error::invalid(format!("event payload for {name:?}: {e}")))?;
    let event = CustomEvent::new(name, target, detail)
        .with_bubbles(init.bubbles)
        .with_cancelable(init.cancelable);
    Ok(doc.dispatch_event(&event)?)
}
