//! Host capabilities.
//!
//! Everything that leaves the document goes through a [`PageHost`]:
//! navigation, reload, native form submission, alerts and the plain
//! yes/no confirmation. Optional richer capabilities (a styled confirm
//! dialog, system notifications) are injected once at mount as
//! `Available`/`Unavailable` enums.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;

use crate::types::FormSubmission;

// =============================================================================
// Page Host
// =============================================================================

/// Side-effect surface of the page.
pub trait PageHost {
    /// Leave the page for `url`.
    fn navigate(&self, url: &str);
    /// Reload the current page.
    fn reload(&self);
    /// Perform a native (full page) form submission.
    fn submit_form(&self, submission: FormSubmission);
    /// Blocking message box.
    fn alert(&self, message: &str);
    /// Blocking yes/no question.
    fn confirm(&self, message: &str) -> bool;
}

/// One side effect requested from a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostAction {
    Navigate { url: String },
    Reload,
    Submit { submission: FormSubmission },
    Alert { message: String },
    Confirm { message: String, answer: bool },
}

/// Host that records every action instead of performing it.
///
/// Used by headless runs and tests. `confirm` answers come from a queue,
/// falling back to `default_answer` once it runs dry.
#[derive(Debug, Default)]
pub struct RecordingHost {
    actions: RefCell<Vec<HostAction>>,
    answers: RefCell<VecDeque<bool>>,
    default_answer: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unqueued confirmation with `answer`.
    pub fn with_default_answer(mut self, answer: bool) -> Self {
        self.default_answer = answer;
        self
    }

    /// Queue the answer for the next confirmation.
    pub fn queue_answer(&self, answer: bool) {
        self.answers.borrow_mut().push_back(answer);
    }

    pub fn actions(&self) -> Vec<HostAction> {
        self.actions.borrow().clone()
    }

    /// Drain the recorded actions.
    pub fn take_actions(&self) -> Vec<HostAction> {
        std::mem::take(&mut *self.actions.borrow_mut())
    }

    pub fn submissions(&self) -> Vec<FormSubmission> {
        self.actions
            .borrow()
            .iter()
            .filter_map(|action| match action {
                HostAction::Submit { submission } => Some(submission.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.actions
            .borrow()
            .iter()
            .filter_map(|action| match action {
                HostAction::Alert { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.actions
            .borrow()
            .iter()
            .filter_map(|action| match action {
                HostAction::Navigate { url } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn reload_count(&self) -> usize {
        self.actions
            .borrow()
            .iter()
            .filter(|action| matches!(action, HostAction::Reload))
            .count()
    }

    fn record(&self, action: HostAction) {
        self.actions.borrow_mut().push(action);
    }
}

impl PageHost for RecordingHost {
    fn navigate(&self, url: &str) {
        self.record(HostAction::Navigate { url: url.to_string() });
    }

    fn reload(&self) {
        self.record(HostAction::Reload);
    }

    fn submit_form(&self, submission: FormSubmission) {
        self.record(HostAction::Submit { submission });
    }

    fn alert(&self, message: &str) {
        self.record(HostAction::Alert { message: message.to_string() });
    }

    fn confirm(&self, message: &str) -> bool {
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.default_answer);
        self.record(HostAction::Confirm {
            message: message.to_string(),
            answer,
        });
        answer
    }
}

// =============================================================================
// Confirm Dialog
// =============================================================================

/// Content of a rich confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmRequest {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
    /// CSS color of the confirm button.
    pub confirm_color: String,
}

/// A styled, asynchronous confirmation dialog.
#[async_trait(?Send)]
pub trait ConfirmPrompt {
    /// Resolve to true if the user confirmed.
    async fn confirm(&self, request: &ConfirmRequest) -> bool;
}

#[derive(Clone, Default)]
pub enum ConfirmDialog {
    Available(Rc<dyn ConfirmPrompt>),
    /// Fall back to [`PageHost::confirm`].
    #[default]
    Unavailable,
}

// =============================================================================
// Notifications
// =============================================================================

/// Notification permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    /// Not yet asked.
    #[default]
    Default,
}

/// System notification sink.
pub trait Notifier {
    fn permission(&self) -> Permission;
    fn notify(&self, title: &str, body: &str);
}

#[derive(Clone, Default)]
pub enum NotificationCapability {
    Available(Rc<dyn Notifier>),
    #[default]
    Unavailable,
}

/// Optional capabilities selected once at mount.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub confirm_dialog: ConfirmDialog,
    pub notifications: NotificationCapability,
}
