//! Timers Module - Per-element debounce timers
//!
//! Each element owns at most one pending timer. Scheduling a new timer for
//! an element aborts the previous one, so a burst of events collapses into a
//! single callback fired `delay` after the last event.
//!
//! Timers are `tokio` local tasks: callers must be running inside a
//! `tokio::task::LocalSet`.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use spark_inventory::state::timers;
//!
//! // Every keystroke restarts the 500ms window
//! timers::debounce(search_input, Duration::from_millis(500), move || {
//!     submit(form);
//! });
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

// =============================================================================
// TIMER REGISTRY
// =============================================================================

struct PendingTimer {
    handle: JoinHandle<()>,
    generation: u64,
}

thread_local! {
    /// Pending timer per element index.
    static TIMERS: RefCell<HashMap<usize, PendingTimer>> = RefCell::new(HashMap::new());

    /// Monotonic counter identifying each scheduled timer.
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn next_generation() -> u64 {
    GENERATION.with(|g| {
        let next = g.get() + 1;
        g.set(next);
        next
    })
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Run `callback` after `delay`, superseding any timer pending for `index`.
pub fn debounce<F>(index: usize, delay: Duration, callback: F)
where
    F: FnOnce() + 'static,
{
    let generation = next_generation();

    let handle = tokio::task::spawn_local(async move {
        tokio::time::sleep(delay).await;

        // Only the latest timer for this index may claim the slot
        let is_current = TIMERS.with(|timers| {
            let mut timers = timers.borrow_mut();
            match timers.get(&index) {
                Some(pending) if pending.generation == generation => {
                    timers.remove(&index);
                    true
                }
                _ => false,
            }
        });

        if is_current {
            callback();
        }
    });

    let previous = TIMERS.with(|timers| {
        timers
            .borrow_mut()
            .insert(index, PendingTimer { handle, generation })
    });

    if let Some(previous) = previous {
        previous.handle.abort();
        tracing::trace!(element = index, "debounce timer superseded");
    }
}

/// Cancel the pending timer for `index`. Returns true if one was pending.
pub fn cancel(index: usize) -> bool {
    let pending = TIMERS.with(|timers| timers.borrow_mut().remove(&index));
    match pending {
        Some(pending) => {
            pending.handle.abort();
            true
        }
        None => false,
    }
}

/// Check if a timer is pending for `index`.
pub fn is_pending(index: usize) -> bool {
    TIMERS.with(|timers| timers.borrow().contains_key(&index))
}

/// Number of pending timers across all elements.
pub fn pending_count() -> usize {
    TIMERS.with(|timers| timers.borrow().len())
}

/// Abort every pending timer (for testing and unmount).
pub fn reset_timers() {
    let pending: Vec<PendingTimer> =
        TIMERS.with(|timers| timers.borrow_mut().drain().map(|(_, p)| p).collect());
    for timer in pending {
        timer.handle.abort();
    }
}

// =============================================================================
// TESTS
// =============================================================================
