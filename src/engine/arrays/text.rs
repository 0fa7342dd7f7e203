//! Document Engine - Text Arrays
//!
//! Text-related properties:
//! - textContent: Rendered text of the element
//! - value: Current value of a form control (or label of `input[type=submit]`)
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained tracking.

use spark_signals::TrackedSlotArray;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Text content string.
    static TEXT_CONTENT: TrackedSlotArray<String> = TrackedSlotArray::new(Some(String::new()));

    /// Control value.
    static VALUE: TrackedSlotArray<String> = TrackedSlotArray::new(Some(String::new()));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    TEXT_CONTENT.with(|arr| { let _ = arr.peek(index); });
    VALUE.with(|arr| { let _ = arr.peek(index); });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    TEXT_CONTENT.with(|arr| arr.clear(index));
    VALUE.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    TEXT_CONTENT.with(|arr| arr.clear_all());
    VALUE.with(|arr| arr.clear_all());
}

// =============================================================================
// Text Content
// =============================================================================

/// Get text content at index (reactive).
pub fn get_text_content(index: usize) -> String {
    TEXT_CONTENT.with(|arr| arr.get(index))
}

/// Set text content at index.
pub fn set_text_content(index: usize, content: String) {
    TEXT_CONTENT.with(|arr| arr.set_value(index, content));
}

// =============================================================================
// Value
// =============================================================================

/// Get control value at index (reactive).
pub fn get_value(index: usize) -> String {
    VALUE.with(|arr| arr.get(index))
}

/// Set control value at index.
pub fn set_value(index: usize, value: String) {
    VALUE.with(|arr| arr.set_value(index, value));
}
