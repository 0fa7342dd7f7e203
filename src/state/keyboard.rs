//! Keyboard Module - Key events and handler registry
//!
//! The host delivers key events with the focused element as `target` and a
//! monotonic timestamp. Handlers either watch one element (a barcode field)
//! or the whole page (shortcuts). Meaning is left to the controllers.
//!
//! # Example
//!
//! ```ignore
//! use spark_inventory::state::keyboard;
//!
//! // Enter presses on a barcode field
//! let cleanup = keyboard::on_element(barcode_input, |event| {
//!     if event.key == "Enter" {
//!         println!("Enter at {}ms", event.time_stamp);
//!     }
//!     false // Don't consume
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with ctrl and alt
    pub fn ctrl_alt() -> Self {
        Self { ctrl: true, alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "n")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
    /// Monotonic milliseconds since page load, as stamped by the host
    pub time_stamp: u64,
    /// Element that had focus when the key was pressed
    pub target: Option<usize>,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
            time_stamp: 0,
            target: None,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            ..Self::new(key)
        }
    }

    /// Stamp the event time
    pub fn at(mut self, time_stamp: u64) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Set the focused element the event is delivered to
    pub fn on(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Rc<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

#[derive(Default)]
struct HandlerRegistry {
    page: Vec<(usize, KeyHandler)>,
    elements: HashMap<usize, Vec<(usize, KeyHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn register(&mut self, target: Option<usize>, handler: KeyHandler) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        match target {
            Some(index) => self.elements.entry(index).or_default().push((id, handler)),
            None => self.page.push((id, handler)),
        }
        id
    }

    fn unregister(&mut self, target: Option<usize>, id: usize) {
        match target {
            Some(index) => {
                if let Some(handlers) = self.elements.get_mut(&index) {
                    handlers.retain(|(handler_id, _)| *handler_id != id);
                    if handlers.is_empty() {
                        self.elements.remove(&index);
                    }
                }
            }
            None => self.page.retain(|(handler_id, _)| *handler_id != id),
        }
    }

    fn snapshot(&self, target: Option<usize>) -> Vec<KeyHandler> {
        let handlers = match target {
            Some(index) => self.elements.get(&index).map(Vec::as_slice).unwrap_or_default(),
            None => self.page.as_slice(),
        };
        handlers.iter().map(|(_, h)| h.clone()).collect()
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::default());
}

fn register(target: Option<usize>, handler: KeyHandler) -> impl FnOnce() {
    let id = REGISTRY.with(|reg| reg.borrow_mut().register(target, handler));
    move || REGISTRY.with(|reg| reg.borrow_mut().unregister(target, id))
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a key event. Returns true if a handler consumed it.
///
/// Handlers of the target element run first, then page handlers. Only
/// presses are dispatched. Handlers are snapshotted before they run, so a
/// handler may dispatch further events or register new handlers.
pub fn dispatch(event: KeyboardEvent) -> bool {
    if !event.is_press() {
        return false;
    }

    if let Some(target) = event.target {
        let element_handlers = REGISTRY.with(|reg| reg.borrow().snapshot(Some(target)));
        if element_handlers.iter().any(|handler| handler(&event)) {
            return true;
        }
    }

    let page_handlers = REGISTRY.with(|reg| reg.borrow().snapshot(None));
    page_handlers.iter().any(|handler| handler(&event))
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to every key event on the page.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    register(None, Rc::new(handler))
}

/// Subscribe to key events targeting element `index`.
/// Returns cleanup function.
pub fn on_element<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    register(Some(index), Rc::new(handler))
}

/// Drop every handler of a released element.
pub fn cleanup_index(index: usize) {
    REGISTRY.with(|reg| {
        reg.borrow_mut().elements.remove(&index);
    });
}

/// Number of handlers attached to element `index`.
pub fn handler_count(index: usize) -> usize {
    REGISTRY.with(|reg| reg.borrow().elements.get(&index).map(Vec::len).unwrap_or(0))
}

/// Clear all handlers (for testing)
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = HandlerRegistry::default());
}

// =============================================================================
// TESTS
// =============================================================================
