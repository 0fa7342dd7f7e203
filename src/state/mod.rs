//! State Module - Runtime state management systems
//!
//! This module contains the event and timing systems controllers build on:
//!
//! - **Keyboard** - Key event types, dispatch, handler registry
//! - **Events** - Document events with bubbling dispatch
//! - **Timers** - Per-element debounce timers on tokio local tasks

pub mod events;
pub mod keyboard;
pub mod timers;

pub use events::{EventKind, PageEvent};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
