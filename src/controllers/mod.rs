//! Page controllers.
//!
//! Each controller attaches to elements found in the document and reacts to
//! events delivered into it. Controllers share nothing but the document:
//!
//! - [`stock_classifier`] - Severity tiers and warning icons on stock rows
//! - [`rapid_entry`] - Scanner burst detection on barcode inputs
//! - [`filter_submit`] - Debounced auto-submit of filter forms
//! - [`quick_add`] - Asynchronous quick-add with rollback
//! - [`stock_alerts`] - Low-stock widgets and one-shot notifications
//! - [`delete_confirm`] - Confirmation before following delete links
//! - [`row_links`] - Clickable product and order rows
//! - [`shortcuts`] - Ctrl+Alt+N for the "add" button
//!
//! # Pattern
//!
//! Every `attach` function registers listeners and returns a [`Cleanup`]
//! that removes them. [`crate::pipeline::mount`] calls them all.

pub mod delete_confirm;
pub mod filter_submit;
pub mod quick_add;
pub mod rapid_entry;
pub mod row_links;
pub mod shortcuts;
pub mod stock_alerts;
pub mod stock_classifier;

/// Cleanup function returned by controllers.
pub type Cleanup = Box<dyn FnOnce()>;

/// Combine several cleanups into one.
pub fn combine(cleanups: Vec<Cleanup>) -> Cleanup {
    Box::new(move || {
        for cleanup in cleanups {
            cleanup();
        }
    })
}
