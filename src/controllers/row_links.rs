//! Row Links - Clickable table rows.
//!
//! Product tables delegate clicks: a click anywhere in a `tr[data-url]`
//! navigates to that URL. Order tables attach per row and follow the row's
//! `a.btn-view` link. Clicks that start on an interactive control keep their
//! own behavior.

use std::rc::Rc;

use crate::host::PageHost;
use crate::page;
use crate::state::events::{self, EventKind};
use crate::types::{attrs, classes, ElementKind};

use super::{combine, Cleanup};

/// Elements whose clicks never count as row clicks.
pub fn is_interactive(index: usize) -> bool {
    matches!(page::kind(index), ElementKind::Link | ElementKind::Button)
        || page::has_class(index, classes::NO_ROW_CLICK)
}

/// Whether a click on `target` started inside an interactive subtree that
/// lies within `row`.
pub fn started_in_control(target: usize, row: usize) -> bool {
    page::ancestors_inclusive(target)
        .into_iter()
        .take_while(|&i| i != row)
        .any(is_interactive)
}

/// Delegate row clicks on a product table.
pub fn attach_product_table(table: usize, host: Rc<dyn PageHost>) -> Cleanup {
    Box::new(events::on(table, EventKind::Click, move |event| {
        let row = page::closest(event.target, |i| {
            page::kind(i) == ElementKind::TableRow && page::attr(i, attrs::DATA_URL).is_some()
        });
        let Some(row) = row.filter(|&row| page::is_within(row, table)) else {
            return false;
        };
        if started_in_control(event.target, row) {
            return false;
        }
        let Some(url) = page::attr(row, attrs::DATA_URL) else {
            return false;
        };
        host.navigate(&url);
        true
    }))
}

/// Make each row of an order table open its `a.btn-view` link.
pub fn attach_order_rows(table: usize, host: Rc<dyn PageHost>) -> Cleanup {
    let rows = page::query_all(Some(table), |i| page::kind(i) == ElementKind::TableRow);

    let cleanups = rows
        .into_iter()
        .map(|row| {
            let host = host.clone();
            Box::new(events::on(row, EventKind::Click, move |event| {
                let on_control = matches!(
                    page::kind(event.target),
                    ElementKind::Link | ElementKind::Button | ElementKind::Input(_) | ElementKind::Select
                );
                if on_control {
                    return false;
                }

                let view = page::query_first(Some(row), |i| {
                    page::kind(i) == ElementKind::Link && page::has_class(i, classes::BTN_VIEW)
                });
                match view.and_then(|link| page::attr(link, attrs::HREF)) {
                    Some(href) => {
                        host.navigate(&href);
                        true
                    }
                    None => false,
                }
            })) as Cleanup
        })
        .collect();

    combine(cleanups)
}
