//! Delete Confirm - Ask before following a delete link.
//!
//! The click on a `.btn-delete` link is always consumed. With a rich
//! dialog available the question is asked asynchronously; otherwise the
//! host's plain confirm is used. Either way a confirmed deletion navigates
//! to the link's `href`.

use std::rc::Rc;

use tracing::debug;

use crate::config::DeleteConfig;
use crate::host::{ConfirmDialog, ConfirmRequest, PageHost};
use crate::page;
use crate::state::events::{self, EventKind};
use crate::types::attrs;

use super::Cleanup;

/// Question shown for `name`.
pub fn confirm_text(name: &str) -> String {
    format!("Are you sure you want to delete {name}?")
}

/// Dialog content for the delete button `button`.
pub fn request_for(button: usize, config: &DeleteConfig) -> ConfirmRequest {
    let name = page::attr(button, attrs::DATA_PRODUCT_NAME)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| config.fallback_name.clone());

    ConfirmRequest {
        title: config.title.clone(),
        text: confirm_text(&name),
        confirm_label: config.confirm_label.clone(),
        cancel_label: config.cancel_label.clone(),
        confirm_color: config.confirm_color.clone(),
    }
}

/// Guard clicks on `button` with a confirmation.
///
/// With [`ConfirmDialog::Available`] this spawns a local task, so it must
/// run inside a `tokio::task::LocalSet`.
pub fn attach(
    button: usize,
    dialog: ConfirmDialog,
    host: Rc<dyn PageHost>,
    config: Rc<DeleteConfig>,
) -> Cleanup {
    Box::new(events::on(button, EventKind::Click, move |_| {
        let href = page::attr(button, attrs::HREF);
        let request = request_for(button, &config);

        match &dialog {
            ConfirmDialog::Available(prompt) => {
                let prompt = prompt.clone();
                let host = host.clone();
                tokio::task::spawn_local(async move {
                    let confirmed = prompt.confirm(&request).await;
                    debug!(button, confirmed, "delete dialog answered");
                    if let (true, Some(href)) = (confirmed, href) {
                        host.navigate(&href);
                    }
                });
            }
            ConfirmDialog::Unavailable => {
                let confirmed = host.confirm(&request.text);
                debug!(button, confirmed, "delete confirm answered");
                if let (true, Some(href)) = (confirmed, href) {
                    host.navigate(&href);
                }
            }
        }
        true
    }))
}
