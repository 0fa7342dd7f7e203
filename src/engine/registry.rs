//! Element Registry - Index allocation for parallel arrays.
//!
//! Every element of the document is an index. The registry hands indices
//! out (reusing released ones first), maps them to element ids, tracks the
//! parent used while building nested markup and runs destroy callbacks when
//! an element and its subtree are released.
//!
//! Each allocation also gets a serial number that is never reused. Indices
//! are recycled, so the serial is what orders elements and tells a new
//! element apart from a released one that had the same index.
//!
//! The allocated set is a `ReactiveSet`, so deriveds that iterate the
//! document re-run when elements come and go.

use std::cell::RefCell;
use std::collections::HashMap;
use spark_signals::ReactiveSet;

use super::arrays;

// =============================================================================
// Registry State
// =============================================================================

#[derive(Default)]
struct Registry {
    ids: HashMap<String, usize>,
    indices: HashMap<usize, String>,
    free: Vec<usize>,
    next_index: usize,
    generated_ids: usize,
    serials: HashMap<usize, u64>,
    next_serial: u64,
    parents: Vec<usize>,
    on_destroy: HashMap<usize, Vec<Box<dyn FnOnce()>>>,
}

impl Registry {
    fn generate_id(&mut self) -> String {
        let id = format!("e{}", self.generated_ids);
        self.generated_ids += 1;
        id
    }

    fn take_index(&mut self) -> usize {
        self.free.pop().unwrap_or_else(|| {
            let index = self.next_index;
            self.next_index += 1;
            index
        })
    }

    fn forget(&mut self, index: usize) {
        self.serials.remove(&index);
        if let Some(id) = self.indices.remove(&index) {
            // A repeated id resolves to the oldest element still using it
            if self.ids.get(&id) == Some(&index) {
                let successor = self
                    .indices
                    .iter()
                    .filter(|(_, other)| **other == id)
                    .map(|(&other, _)| other)
                    .min_by_key(|other| self.serials.get(other).copied().unwrap_or(u64::MAX));
                match successor {
                    Some(other) => self.ids.insert(id, other),
                    None => self.ids.remove(&id),
                };
            }
        }
        self.free.push(index);
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());

    /// Currently allocated indices.
    static ALLOCATED_INDICES: ReactiveSet<usize> = ReactiveSet::new();
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None at the document root).
pub fn get_current_parent_index() -> Option<usize> {
    REGISTRY.with(|reg| reg.borrow().parents.last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    REGISTRY.with(|reg| reg.borrow_mut().parents.push(index))
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    REGISTRY.with(|reg| {
        reg.borrow_mut().parents.pop();
    })
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new element.
///
/// Without an `id` one is generated (`e0`, `e1`, ...). Every call gets a
/// fresh index. When markup repeats an id, [`get_index`] keeps resolving to
/// the first element that used it.
pub fn allocate_index(id: Option<&str>) -> usize {
    let index = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let element_id = match id {
            Some(id) => id.to_string(),
            None => reg.generate_id(),
        };

        let index = reg.take_index();
        reg.ids.entry(element_id.clone()).or_insert(index);
        reg.indices.insert(index, element_id);

        let serial = reg.next_serial;
        reg.next_serial += 1;
        reg.serials.insert(index, serial);
        index
    });

    ALLOCATED_INDICES.with(|set| {
        set.insert(index);
    });
    arrays::ensure_all_capacity(index);

    index
}

/// Release an index and, first, every element parented under it.
pub fn release_index(index: usize) {
    if !is_allocated(index) {
        return;
    }

    let children: Vec<usize> = ALLOCATED_INDICES
        .with(|set| set.iter())
        .into_iter()
        .filter(|&child| arrays::core::peek_parent_index(child) == Some(index))
        .collect();
    for child in children {
        release_index(child);
    }

    // Callbacks may touch other registries; run them outside the borrow
    let callbacks = REGISTRY.with(|reg| reg.borrow_mut().on_destroy.remove(&index));
    for callback in callbacks.into_iter().flatten() {
        callback();
    }

    REGISTRY.with(|reg| reg.borrow_mut().forget(index));
    ALLOCATED_INDICES.with(|set| {
        set.remove(&index);
    });
    arrays::clear_all_at_index(index);

    // Empty document: start again from index 0
    if get_allocated_count() == 0 {
        arrays::reset_all_arrays();
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.free.clear();
            reg.next_index = 0;
        });
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the element at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    REGISTRY.with(|reg| {
        reg.borrow_mut()
            .on_destroy
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for an element ID.
pub fn get_index(id: &str) -> Option<usize> {
    REGISTRY.with(|reg| reg.borrow().ids.get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    REGISTRY.with(|reg| reg.borrow().indices.get(&index).cloned())
}

/// Serial number of the element at `index`, unique for the thread's lifetime.
pub fn get_serial(index: usize) -> Option<u64> {
    REGISTRY.with(|reg| reg.borrow().serials.get(&index).copied())
}

/// All allocated indices in creation order.
///
/// Note: This creates a reactive dependency when called from a derived/effect.
pub fn get_allocated_indices() -> Vec<usize> {
    let mut indices = ALLOCATED_INDICES.with(|set| set.iter());
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        indices.sort_unstable_by_key(|index| reg.serials.get(index).copied().unwrap_or(u64::MAX));
    });
    indices
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.contains(&index))
}

/// Number of allocated elements.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state. Pending destroy callbacks are dropped unrun.
pub fn reset_registry() {
    REGISTRY.with(|reg| *reg.borrow_mut() = Registry::default());
    ALLOCATED_INDICES.with(|set| set.clear());
    arrays::reset_all_arrays();
}
