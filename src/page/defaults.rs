//! Default actions.
//!
//! What the browser does after an event nobody consumed: follow the link,
//! submit the form, toggle the checkbox. Host bridges deliver user input
//! through these functions so controllers see the same event sequence a
//! page would.

use crate::engine::arrays::interaction;
use crate::host::PageHost;
use crate::state::events::{self, EventKind, PageEvent};
use crate::types::{attrs, ElementKind};

use super::query::{attr, closest, enclosing_form, form_submission, is_submit_button, kind};

/// Deliver a click on `target`. Returns true if a listener prevented the
/// default action.
///
/// Disabled controls swallow clicks without dispatching anything.
pub fn click(target: usize, host: &dyn PageHost) -> bool {
    let target_kind = kind(target);
    let is_control = target_kind.is_form_control() || target_kind == ElementKind::Button;
    if is_control && interaction::get_disabled(target) {
        return true;
    }

    // Checkables toggle before listeners run and revert if prevented
    let toggles = matches!(target_kind, ElementKind::Input(t) if t.is_checkable());
    let was_checked = interaction::get_checked(target);
    if toggles {
        interaction::set_checked(target, !was_checked);
    }

    if events::dispatch(PageEvent::new(EventKind::Click, target)) {
        if toggles {
            interaction::set_checked(target, was_checked);
        }
        return true;
    }

    if toggles {
        events::dispatch(PageEvent::new(EventKind::Change, target));
        return false;
    }

    if let Some(link) = closest(target, |i| kind(i) == ElementKind::Link) {
        if let Some(href) = attr(link, attrs::HREF) {
            host.navigate(&href);
        }
        return false;
    }

    if let Some(button) = closest(target, is_submit_button) {
        if let Some(form) = enclosing_form(button) {
            submit(form, host);
        }
    }

    false
}

/// Deliver a submit on `form`. Without a consuming listener the host
/// performs a native submission. Returns true if prevented.
pub fn submit(form: usize, host: &dyn PageHost) -> bool {
    if events::dispatch(PageEvent::new(EventKind::Submit, form)) {
        return true;
    }
    host.submit_form(form_submission(form));
    false
}
