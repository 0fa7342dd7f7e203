//! Filter Submit - Auto-submit filter forms.
//!
//! Discrete controls (selects, checkboxes, numbers, dates) submit on every
//! `change`. Free-text inputs submit once typing pauses: each `input` event
//! restarts a per-input debounce timer.

use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::host::PageHost;
use crate::page;
use crate::state::events::{self, EventKind};
use crate::state::timers;
use crate::types::{attrs, ElementKind};

use super::{combine, Cleanup};

fn submit(form: usize, host: &dyn PageHost, trigger: &'static str) {
    let submission = page::form_submission(form);
    info!(form, trigger, fields = submission.fields.len(), "auto-submitting filter form");
    host.submit_form(submission);
}

/// Attach auto-submit to every `select` and `input` of `form`.
pub fn attach(form: usize, debounce: Duration, host: Rc<dyn PageHost>) -> Cleanup {
    let controls = page::query_all(Some(form), |i| {
        matches!(page::kind(i), ElementKind::Input(_) | ElementKind::Select)
    });

    let mut cleanups: Vec<Cleanup> = Vec::with_capacity(controls.len());
    for control in controls {
        let host = host.clone();
        match page::kind(control) {
            ElementKind::Input(t) if t.is_free_text() => {
                let cleanup = events::on(control, EventKind::Input, move |_| {
                    let host = host.clone();
                    timers::debounce(control, debounce, move || submit(form, host.as_ref(), "text"));
                    false
                });
                cleanups.push(Box::new(move || {
                    cleanup();
                    timers::cancel(control);
                }));
            }
            _ => {
                let cleanup = events::on(control, EventKind::Change, move |_| {
                    submit(form, host.as_ref(), "change");
                    false
                });
                cleanups.push(Box::new(cleanup));
            }
        }
    }

    debug!(form, controls = cleanups.len(), "filter form attached");
    combine(cleanups)
}

/// The standalone order status filter: `select[name=status]`.
pub fn is_status_filter(index: usize) -> bool {
    page::kind(index) == ElementKind::Select
        && page::attr(index, attrs::NAME).as_deref() == Some("status")
}

/// Submit the status filter's form whenever it changes.
pub fn attach_status_filter(select: usize, host: Rc<dyn PageHost>) -> Cleanup {
    Box::new(events::on(select, EventKind::Change, move |_| {
        if let Some(form) = page::enclosing_form(select) {
            submit(form, host.as_ref(), "status");
        }
        false
    }))
}
