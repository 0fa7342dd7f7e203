//! Events Module - Document events and listener registry
//!
//! Element-level events the host delivers (`click`, `change`, `input`,
//! `submit`) plus synthetic events controllers raise (`barcode-scanned`).
//!
//! Dispatch walks from the target up through its ancestors, so a listener on
//! a table sees clicks on any of its cells. A listener returns true to
//! consume the event: propagation stops and the host skips the default
//! action (navigation for links, native submission for forms).
//!
//! # Example
//!
//! ```ignore
//! use spark_inventory::state::events::{self, EventKind, PageEvent};
//!
//! let cleanup = events::on(form, EventKind::Submit, |event| {
//!     println!("submit from {}", event.target);
//!     true // prevent native submission
//! });
//!
//! let prevented = events::dispatch(PageEvent::new(EventKind::Submit, form));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::page::ancestors_inclusive;

// =============================================================================
// TYPES
// =============================================================================

/// Kind of document event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
    Submit,
    /// Synthetic event raised by a controller.
    Custom(String),
}

impl EventKind {
    pub fn custom(name: &str) -> Self {
        Self::Custom(name.to_string())
    }
}

/// A document event.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEvent {
    pub kind: EventKind,
    /// Element the event originated on.
    pub target: usize,
    /// Element whose listener is currently running (set during dispatch).
    pub current_target: usize,
    /// Monotonic milliseconds since page load.
    pub time_stamp: u64,
}

impl PageEvent {
    pub fn new(kind: EventKind, target: usize) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            time_stamp: 0,
        }
    }

    pub fn at(mut self, time_stamp: u64) -> Self {
        self.time_stamp = time_stamp;
        self
    }
}

/// Listener for document events. Return true to consume the event.
pub type EventHandler = Rc<dyn Fn(&PageEvent) -> bool>;

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

struct ListenerRegistry {
    listeners: HashMap<(usize, EventKind), Vec<(usize, EventHandler)>>,
    next_id: usize,
}

impl ListenerRegistry {
    fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<ListenerRegistry> = RefCell::new(ListenerRegistry::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Listen for `kind` events on `index` (and, by bubbling, its descendants).
/// Returns cleanup function.
pub fn on<F>(index: usize, kind: EventKind, handler: F) -> impl FnOnce()
where
    F: Fn(&PageEvent) -> bool + 'static,
{
    let key = (index, kind);
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.listeners
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.listeners.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.listeners.remove(&key);
                }
            }
        });
    }
}

/// Dispatch an event, bubbling from the target to the root.
/// Returns true if a listener consumed it (default action prevented).
pub fn dispatch(event: PageEvent) -> bool {
    for node in ancestors_inclusive(event.target) {
        let handlers: Vec<EventHandler> = REGISTRY.with(|reg| {
            reg.borrow()
                .listeners
                .get(&(node, event.kind.clone()))
                .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
                .unwrap_or_default()
        });

        let event = PageEvent {
            current_target: node,
            ..event.clone()
        };
        if handlers.iter().any(|handler| handler(&event)) {
            return true;
        }
    }
    false
}

/// Number of listeners attached to `index` for `kind`.
pub fn listener_count(index: usize, kind: &EventKind) -> usize {
    REGISTRY.with(|reg| {
        reg.borrow()
            .listeners
            .get(&(index, kind.clone()))
            .map(Vec::len)
            .unwrap_or(0)
    })
}

/// Remove every listener attached to `index`.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().listeners.retain(|(i, _), _| *i != index);
    });
}

/// Clear all listeners (for testing).
pub fn reset_events() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.listeners.clear();
        reg.next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================
