//! Keyboard shortcuts.
//!
//! Ctrl+Alt+N clicks the page's `.btn-add` element, unless the key was
//! typed into a text field.

use std::rc::Rc;

use tracing::debug;

use crate::host::PageHost;
use crate::page::{self, defaults};
use crate::state::keyboard::{self, KeyboardEvent};
use crate::types::classes;

use super::Cleanup;

/// Ctrl+Alt+N, either case.
pub fn is_new_item_shortcut(event: &KeyboardEvent) -> bool {
    event.modifiers.ctrl && event.modifiers.alt && event.key.eq_ignore_ascii_case("n")
}

/// Register the global shortcut handler.
pub fn attach(host: Rc<dyn PageHost>) -> Cleanup {
    Box::new(keyboard::on(move |event| {
        if !is_new_item_shortcut(event) {
            return false;
        }
        if event.target.is_some_and(|t| page::kind(t).accepts_text()) {
            return false;
        }
        let Some(button) = page::by_class(None, classes::BTN_ADD).into_iter().next() else {
            return false;
        };

        debug!(button, "new item shortcut");
        defaults::click(button, host.as_ref());
        true
    }))
}
