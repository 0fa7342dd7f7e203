//! Quick Add - Asynchronous form submission with rollback.
//!
//! The native submit is suppressed. While the POST is in flight the form's
//! submit control is disabled and shows the busy label; whatever happens
//! (success, rejection, transport failure, or the task being aborted) the
//! control is restored when the [`PendingSubmission`] guard drops.
//!
//! - `{"success": true}` reloads the page
//! - `{"success": false, "message": m}` alerts `m` (or the fallback text)
//! - a transport failure alerts the generic error text

use std::cell::RefCell;
use std::rc::Rc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::QuickAddConfig;
use crate::engine::arrays::{interaction, text};
use crate::error::TransportError;
use crate::host::PageHost;
use crate::page;
use crate::state::events::{self, EventKind};
use crate::transport::FormTransport;
use crate::types::{ElementKind, FormSubmission, InputType};

use super::Cleanup;

/// How a quick-add submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Server accepted; the page was reloaded.
    Reloaded,
    /// Server rejected; the message was alerted.
    Rejected(String),
    /// The exchange failed; the generic error was alerted.
    Failed(TransportError),
}

// =============================================================================
// Pending Submission
// =============================================================================

/// Busy state of a form's submit control. Restores the control on drop.
pub struct PendingSubmission {
    button: Option<usize>,
    original_label: String,
}

impl PendingSubmission {
    /// Disable the submit control of `form` and show `busy_label`.
    /// A form without a submit control gets an inert guard.
    pub fn begin(form: usize, busy_label: &str) -> Self {
        let button = page::submit_control(form);
        let original_label = button.map(label).unwrap_or_default();

        if let Some(button) = button {
            interaction::set_disabled(button, true);
            set_label(button, busy_label);
        }

        Self { button, original_label }
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        if let Some(button) = self.button {
            interaction::set_disabled(button, false);
            set_label(button, &self.original_label);
        }
    }
}

/// `<input type=submit>` shows its value; `<button>` shows its text.
fn label(button: usize) -> String {
    match page::kind(button) {
        ElementKind::Input(InputType::Submit) => text::get_value(button),
        _ => text::get_text_content(button),
    }
}

fn set_label(button: usize, label: &str) {
    match page::kind(button) {
        ElementKind::Input(InputType::Submit) => text::set_value(button, label.to_string()),
        _ => text::set_text_content(button, label.to_string()),
    }
}

// =============================================================================
// Submission
// =============================================================================

/// Submit `form` through `transport` and reconcile the page.
pub async fn submit(
    form: usize,
    transport: &dyn FormTransport,
    host: &dyn PageHost,
    config: &QuickAddConfig,
) -> SubmitOutcome {
    let submission = page::form_submission(form);
    let pending = PendingSubmission::begin(form, &config.busy_label);
    exchange(submission, pending, transport, host, config).await
}

/// Post an already captured submission. `_pending` is held until the
/// exchange settles or the future is dropped.
async fn exchange(
    submission: FormSubmission,
    _pending: PendingSubmission,
    transport: &dyn FormTransport,
    host: &dyn PageHost,
    config: &QuickAddConfig,
) -> SubmitOutcome {
    let form = submission.form;
    debug!(form, action = %submission.action, "quick-add submission started");

    match transport.post_form(&submission).await {
        Ok(response) if response.success => {
            info!(form, "quick-add accepted, reloading");
            host.reload();
            SubmitOutcome::Reloaded
        }
        Ok(response) => {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| config.fallback_error.clone());
            info!(form, %message, "quick-add rejected");
            host.alert(&message);
            SubmitOutcome::Rejected(message)
        }
        Err(e) => {
            warn!(form, error = %e, "quick-add transport failed");
            host.alert(&config.transport_error);
            SubmitOutcome::Failed(e)
        }
    }
}

/// Intercept submissions of `form`. Each one runs as a local task.
///
/// The submit control is disabled before the listener returns, so a second
/// click lands on a disabled button and is swallowed. Must be called inside
/// a `tokio::task::LocalSet`. Cleanup detaches the listener and aborts
/// submissions still in flight.
pub fn attach(
    form: usize,
    transport: Rc<dyn FormTransport>,
    host: Rc<dyn PageHost>,
    config: Rc<QuickAddConfig>,
) -> Cleanup {
    let in_flight: Rc<RefCell<Vec<JoinHandle<()>>>> = Rc::new(RefCell::new(Vec::new()));
    let tasks = in_flight.clone();

    let listener = events::on(form, EventKind::Submit, move |_| {
        let transport = transport.clone();
        let host = host.clone();
        let config = config.clone();

        let submission = page::form_submission(form);
        let pending = PendingSubmission::begin(form, &config.busy_label);

        let handle = tokio::task::spawn_local(async move {
            exchange(submission, pending, transport.as_ref(), host.as_ref(), &config).await;
        });

        let mut tasks = tasks.borrow_mut();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
        true
    });

    Box::new(move || {
        listener();
        for task in in_flight.borrow_mut().drain(..) {
            task.abort();
        }
    })
}
