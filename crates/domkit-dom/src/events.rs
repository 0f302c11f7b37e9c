//! DOM Events
//!
//! Custom events and same-thread listeners. Dispatch is synchronous:
//! listeners run in registration order on each node along the path
//! from the target up to the document.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::NodeId;

/// Listener callback
pub type Listener = Rc<dyn Fn(&CustomEvent)>;

/// Handle returned by listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Custom event carrying a name and an arbitrary payload
#[derive(Debug)]
pub struct CustomEvent {
    name: String,
    detail: Value,
    target: NodeId,
    current_target: Cell<NodeId>,
    bubbles: bool,
    cancelable: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl CustomEvent {
    /// Create a bubbling, cancelable event
    pub fn new(name: impl Into<String>, target: NodeId, detail: Value) -> Self {
        Self {
            name: name.into(),
            detail,
            target,
            current_target: Cell::new(target),
            bubbles: true,
            cancelable: true,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Set whether the event bubbles
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set whether the event can be cancelled
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload
    pub fn detail(&self) -> &Value {
        &self.detail
    }

    /// Node the event was dispatched on
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Prevent default action (ignored unless cancelable)
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    /// Stop propagation after the current node's listeners
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

struct Registration {
    id: ListenerId,
    target: NodeId,
    name: String,
    callback: Listener,
}

/// Listener registry keyed by target node and event name
#[derive(Default)]
pub struct EventListeners {
    next_id: u64,
    entries: Vec<Registration>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add(&mut self, target: NodeId, name: &str, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Registration {
            id,
            target,
            name: name.to_string(),
            callback,
        });
        id
    }

    /// Remove a listener; `false` if it was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        self.entries.len() != before
    }

    /// Snapshot of listeners for one node, in registration order
    pub fn for_target(&self, target: NodeId, name: &str) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|r| r.target == target && r.name == name)
            .map(|r| Rc::clone(&r.callback))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run listeners along `path` (target first)
    ///
    /// Returns `false` if a listener prevented the default action.
    pub fn dispatch(&self, event: &CustomEvent, path: &[NodeId]) -> bool {
        let path = if event.bubbles { path } else { &path[..path.len().min(1)] };

        for &node in path {
            event.current_target.set(node);
            for listener in self.for_target(node, &event.name) {
                listener(event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target.set(event.target);
        !event.is_default_prevented()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("listeners", &self.entries.len())
            .finish()
    }
}
