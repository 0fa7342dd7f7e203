//! Document Engine - Parallel Arrays
//!
//! All element state lives in these parallel arrays.
//! Each array index corresponds to one element.
//!
//! Reactive arrays use `TrackedSlotArray` for stable cells with fine-grained
//! per-index tracking. Attributes are read-mostly markup data and live in a
//! plain table.
//!
//! # Array Categories
//!
//! - **core**: Element kind, parent, class name
//! - **text**: Text content and control value
//! - **interaction**: Disabled/checked state and controller marks
//! - **attrs**: Markup attributes (`href`, `action`, `data-*`, ...)

pub mod core;
pub mod text;
pub mod interaction;
pub mod attrs;

use self::core as core_arrays;
use self::text as text_arrays;
use self::interaction as interaction_arrays;
use self::attrs as attr_table;

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    text_arrays::ensure_capacity(index);
    interaction_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    text_arrays::clear_at_index(index);
    interaction_arrays::clear_at_index(index);
    attr_table::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when every element has been released.
pub fn reset_all_arrays() {
    core_arrays::reset();
    text_arrays::reset();
    interaction_arrays::reset();
    attr_table::reset();
}
