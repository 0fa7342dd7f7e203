//! Document Engine - Interaction Arrays
//!
//! User interaction state:
//! - disabled: Control cannot be activated
//! - checked: Checkbox/radio state
//! - marks: Visual state applied by controllers
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained tracking.

use spark_signals::TrackedSlotArray;
use crate::types::Marks;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Is control disabled.
    static DISABLED: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Is checkbox/radio checked.
    static CHECKED: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Controller-applied marks.
    static MARKS: TrackedSlotArray<Marks> = TrackedSlotArray::new(Some(Marks::NONE));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    DISABLED.with(|arr| { let _ = arr.peek(index); });
    CHECKED.with(|arr| { let _ = arr.peek(index); });
    MARKS.with(|arr| { let _ = arr.peek(index); });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    DISABLED.with(|arr| arr.clear(index));
    CHECKED.with(|arr| arr.clear(index));
    MARKS.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    DISABLED.with(|arr| arr.clear_all());
    CHECKED.with(|arr| arr.clear_all());
    MARKS.with(|arr| arr.clear_all());
}

// =============================================================================
// Disabled
// =============================================================================

/// Get disabled state at index (reactive).
pub fn get_disabled(index: usize) -> bool {
    DISABLED.with(|arr| arr.get(index))
}

/// Set disabled state at index.
pub fn set_disabled(index: usize, disabled: bool) {
    DISABLED.with(|arr| arr.set_value(index, disabled));
}

// =============================================================================
// Checked
// =============================================================================

/// Get checked state at index (reactive).
pub fn get_checked(index: usize) -> bool {
    CHECKED.with(|arr| arr.get(index))
}

/// Set checked state at index.
pub fn set_checked(index: usize, checked: bool) {
    CHECKED.with(|arr| arr.set_value(index, checked));
}

// =============================================================================
// Marks
// =============================================================================

/// Get marks at index (reactive).
pub fn get_marks(index: usize) -> Marks {
    MARKS.with(|arr| arr.get(index))
}

/// Replace marks at index.
pub fn set_marks(index: usize, marks: Marks) {
    MARKS.with(|arr| arr.set_value(index, marks));
}

/// Add marks at index, keeping the others.
pub fn insert_marks(index: usize, marks: Marks) {
    MARKS.with(|arr| {
        let current = arr.peek(index);
        if !current.contains(marks) {
            arr.set_value(index, current | marks);
        }
    });
}

/// Remove marks at index, keeping the others.
pub fn remove_marks(index: usize, marks: Marks) {
    MARKS.with(|arr| {
        let current = arr.peek(index);
        if current.intersects(marks) {
            arr.set_value(index, current.difference(marks));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset();
    }

    #[test]
    fn test_disabled_and_checked() {
        setup();

        assert!(!get_disabled(0));
        set_disabled(0, true);
        assert!(get_disabled(0));

        assert!(!get_checked(2));
        set_checked(2, true);
        assert!(get_checked(2));
    }

    #[test]
    fn test_marks_insert_remove() {
        setup();

        insert_marks(4, Marks::CRITICAL_STOCK);
        insert_marks(4, Marks::ALERT_ACTIVE);
        assert_eq!(get_marks(4), Marks::CRITICAL_STOCK | Marks::ALERT_ACTIVE);

        remove_marks(4, Marks::TIER);
        assert_eq!(get_marks(4), Marks::ALERT_ACTIVE);
    }
}
