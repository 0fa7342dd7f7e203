//! Mount API - Attach every controller to the current document.
//!
//! The host builds the document from server markup, then mounts. Mounting
//! runs the initial classification and alert check and attaches listeners;
//! the returned [`MountHandle`] delivers user input with browser default
//! actions and re-runs the passes after the host mutates the document.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_inventory::pipeline::mount;
//! use spark_inventory::{Capabilities, ControllerConfig, RecordingHost};
//!
//! let local = tokio::task::LocalSet::new();
//! local.run_until(async {
//!     let host = Rc::new(RecordingHost::new());
//!     let handle = mount::mount(ControllerConfig::default(), host, Capabilities::default())?;
//!
//!     handle.input_text(search_input, "bolt");
//!     handle.refresh();
//!     handle.unmount();
//! }).await;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::config::ControllerConfig;
use crate::controllers::stock_alerts::AlertMonitor;
use crate::controllers::stock_classifier::{self, Thresholds};
use crate::controllers::{
    delete_confirm, filter_submit, quick_add, rapid_entry, row_links, shortcuts, Cleanup,
};
use crate::error::TransportError;
use crate::host::{Capabilities, PageHost};
use crate::page::{self, defaults};
use crate::state::events::{self, EventKind, PageEvent};
use crate::state::keyboard::{self, KeyboardEvent};
use crate::transport::{FormTransport, HttpTransport};
use crate::types::classes;

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Dropping it detaches every controller.
pub struct MountHandle {
    host: Rc<dyn PageHost>,
    thresholds: Thresholds,
    monitor: RefCell<AlertMonitor>,
    cleanups: Option<Vec<Cleanup>>,
}

impl MountHandle {
    /// Re-run stock classification and the alert check.
    /// Returns the number of notifications raised.
    pub fn refresh(&self) -> usize {
        classify_document(self.thresholds);
        self.monitor.borrow_mut().check_document()
    }

    /// Whether the alert widget `element` has raised its notification.
    pub fn has_notified(&self, element: usize) -> bool {
        self.monitor.borrow().has_notified(element)
    }

    /// Click `target`. Returns true if the default action was prevented.
    pub fn click(&self, target: usize) -> bool {
        defaults::click(target, self.host.as_ref())
    }

    /// Set the value of a discrete control and fire `change`.
    pub fn change(&self, target: usize, value: &str) {
        page::set_value(target, value);
        events::dispatch(PageEvent::new(EventKind::Change, target));
    }

    /// Replace the text of a field and fire `input`.
    pub fn input_text(&self, target: usize, text: &str) {
        page::set_value(target, text);
        events::dispatch(PageEvent::new(EventKind::Input, target));
    }

    /// Deliver a key event. Returns true if a handler consumed it.
    pub fn key_press(&self, event: KeyboardEvent) -> bool {
        keyboard::dispatch(event)
    }

    /// Submit `form`. Returns true if a controller took it over.
    pub fn submit(&self, form: usize) -> bool {
        defaults::submit(form, self.host.as_ref())
    }

    /// Detach every controller.
    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(cleanups) = self.cleanups.take() {
            for cleanup in cleanups {
                cleanup();
            }
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount with the HTTP transport built from `config.quick_add`.
///
/// Must run inside a `tokio::task::LocalSet`: debounce timers, quick-add
/// exchanges and rich confirm dialogs are local tasks.
pub fn mount(
    config: ControllerConfig,
    host: Rc<dyn PageHost>,
    capabilities: Capabilities,
) -> Result<MountHandle, TransportError> {
    let transport = HttpTransport::new(&config.quick_add)?;
    Ok(mount_with_transport(config, host, Rc::new(transport), capabilities))
}

/// Mount with an explicit quick-add transport.
pub fn mount_with_transport(
    config: ControllerConfig,
    host: Rc<dyn PageHost>,
    transport: Rc<dyn FormTransport>,
    capabilities: Capabilities,
) -> MountHandle {
    let thresholds = Thresholds::from(&config.stock);
    let mut cleanups: Vec<Cleanup> = Vec::new();

    // Stock levels and clickable product rows
    let product_tables = page::by_class(None, classes::PRODUCT_TABLE);
    for &table in &product_tables {
        stock_classifier::classify_table(table, thresholds);
        cleanups.push(row_links::attach_product_table(table, host.clone()));
    }

    let delete_config = Rc::new(config.delete.clone());
    let delete_buttons = page::by_class(None, classes::BTN_DELETE);
    for &button in &delete_buttons {
        cleanups.push(delete_confirm::attach(
            button,
            capabilities.confirm_dialog.clone(),
            host.clone(),
            delete_config.clone(),
        ));
    }

    let filter_forms = page::by_class(None, classes::FILTER_FORM);
    for &form in &filter_forms {
        cleanups.push(filter_submit::attach(form, config.filters.debounce(), host.clone()));
    }

    let mut monitor = AlertMonitor::new(
        &config.alerts,
        config.stock.low_stock_threshold,
        capabilities.notifications.clone(),
    );
    monitor.check_document();

    let barcode_inputs = page::by_class(None, classes::BARCODE_INPUT);
    for &input in &barcode_inputs {
        cleanups.push(rapid_entry::attach(input, config.scanner.burst_gap_ms, host.clone()));
    }

    let quick_add_config = Rc::new(config.quick_add.clone());
    let quick_add_forms = page::by_class(None, classes::QUICK_ADD_FORM);
    for &form in &quick_add_forms {
        cleanups.push(quick_add::attach(
            form,
            transport.clone(),
            host.clone(),
            quick_add_config.clone(),
        ));
    }

    cleanups.push(shortcuts::attach(host.clone()));

    // Order pages
    let order_tables = page::by_class(None, classes::ORDER_TABLE);
    for &table in &order_tables {
        cleanups.push(row_links::attach_order_rows(table, host.clone()));
    }

    // A status select inside a filter form is already auto-submitted
    let status_filter = page::query_first(None, |i| {
        filter_submit::is_status_filter(i) && !filter_forms.iter().any(|&f| page::is_within(i, f))
    });
    if let Some(select) = status_filter {
        cleanups.push(filter_submit::attach_status_filter(select, host.clone()));
    }

    info!(
        product_tables = product_tables.len(),
        delete_buttons = delete_buttons.len(),
        filter_forms = filter_forms.len(),
        barcode_inputs = barcode_inputs.len(),
        quick_add_forms = quick_add_forms.len(),
        order_tables = order_tables.len(),
        status_filter = status_filter.is_some(),
        "controllers mounted"
    );

    MountHandle {
        host,
        thresholds,
        monitor: RefCell::new(monitor),
        cleanups: Some(cleanups),
    }
}

fn classify_document(thresholds: Thresholds) {
    for table in page::by_class(None, classes::PRODUCT_TABLE) {
        stock_classifier::classify_table(table, thresholds);
    }
}
