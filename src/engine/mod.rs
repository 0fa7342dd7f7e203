//! Document Engine - Element registry and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: Index allocation, ID mapping, parent context
//! - Arrays: Parallel SlotArrays for element state
//!
//! # Architecture
//!
//! Elements are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Table (parent=None, class="product-table")
//! Index 1: Row   (parent=0,    marks=CRITICAL_STOCK)
//! Index 2: Cell  (parent=1,    class="stock-quantity", text="2")
//! ```
//!
//! Controllers read markup data from the arrays and write their visual
//! state (marks, disabled, labels) back into them.

mod registry;
pub mod arrays;

pub use registry::*;
