//! Document Engine - Core Arrays
//!
//! Structural properties:
//! - kind: What the element is (row, cell, form, input, ...)
//! - parentIndex: Tree structure
//! - className: Server-rendered class list (space separated)

use spark_signals::TrackedSlotArray;
use crate::types::ElementKind;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Element kind.
    static KIND: TrackedSlotArray<ElementKind> = TrackedSlotArray::new(Some(ElementKind::Div));

    /// Parent element index (None = document root).
    static PARENT_INDEX: TrackedSlotArray<Option<usize>> = TrackedSlotArray::new(Some(None));

    /// Class attribute as rendered by the server.
    static CLASS_NAME: TrackedSlotArray<String> = TrackedSlotArray::new(Some(String::new()));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    KIND.with(|arr| { let _ = arr.peek(index); });
    PARENT_INDEX.with(|arr| { let _ = arr.peek(index); });
    CLASS_NAME.with(|arr| { let _ = arr.peek(index); });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    KIND.with(|arr| arr.clear(index));
    PARENT_INDEX.with(|arr| arr.clear(index));
    CLASS_NAME.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    KIND.with(|arr| arr.clear_all());
    PARENT_INDEX.with(|arr| arr.clear_all());
    CLASS_NAME.with(|arr| arr.clear_all());
}

// =============================================================================
// Kind
// =============================================================================

/// Get element kind at index (reactive).
pub fn get_kind(index: usize) -> ElementKind {
    KIND.with(|arr| arr.get(index))
}

/// Set element kind at index.
pub fn set_kind(index: usize, kind: ElementKind) {
    KIND.with(|arr| arr.set_value(index, kind));
}

// =============================================================================
// Parent
// =============================================================================

/// Get parent index (reactive).
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.get(index))
}

/// Get parent index without tracking.
pub fn peek_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.peek(index))
}

/// Set parent index.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    PARENT_INDEX.with(|arr| arr.set_value(index, parent));
}

// =============================================================================
// Class Name
// =============================================================================

/// Get class attribute at index (reactive).
pub fn get_class_name(index: usize) -> String {
    CLASS_NAME.with(|arr| arr.get(index))
}

/// Set class attribute at index.
pub fn set_class_name(index: usize, class_name: String) {
    CLASS_NAME.with(|arr| arr.set_value(index, class_name));
}

/// Check whether the class list at index contains `class`.
pub fn has_class(index: usize, class: &str) -> bool {
    CLASS_NAME.with(|arr| arr.get(index).split_whitespace().any(|c| c == class))
}
