//! Document Engine - Attribute Table
//!
//! Markup attributes (`href`, `action`, `name`, `data-*`) keyed by element
//! index. Attributes are written when the document is built and read by
//! controllers; they are not reactive.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

thread_local! {
    static ATTRIBUTES: RefCell<HashMap<usize, BTreeMap<String, String>>> = RefCell::new(HashMap::new());
}

/// Clear attributes at index.
pub fn clear_at_index(index: usize) {
    ATTRIBUTES.with(|table| {
        table.borrow_mut().remove(&index);
    });
}

/// Reset the table.
pub fn reset() {
    ATTRIBUTES.with(|table| table.borrow_mut().clear());
}

/// Get an attribute value.
pub fn get_attr(index: usize, name: &str) -> Option<String> {
    ATTRIBUTES.with(|table| {
        table
            .borrow()
            .get(&index)
            .and_then(|attrs| attrs.get(name).cloned())
    })
}

/// Set an attribute value.
pub fn set_attr(index: usize, name: &str, value: impl Into<String>) {
    ATTRIBUTES.with(|table| {
        table
            .borrow_mut()
            .entry(index)
            .or_default()
            .insert(name.to_string(), value.into());
    });
}

/// Remove an attribute.
pub fn remove_attr(index: usize, name: &str) {
    ATTRIBUTES.with(|table| {
        if let Some(attrs) = table.borrow_mut().get_mut(&index) {
            attrs.remove(name);
        }
    });
}
