//! End-to-end behavior of a mounted inventory page.
//!
//! Builds a product list page the way a host bridge would, mounts every
//! controller with a recording host and drives it through the handle.
//!
//! Run with: cargo test --test inventory_page

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::LocalSet;
use tokio::time::sleep;

use spark_inventory::controllers::stock_classifier::{row_tier, ALERT_ICON};
use spark_inventory::engine::arrays::interaction;
use spark_inventory::page;
use spark_inventory::types::{attrs, classes};
use spark_inventory::{
    create, mount_with_transport, reset_page, within, Capabilities, ControllerConfig, ElementKind,
    ElementSpec, FormSubmission, FormTransport, HostAction, InputType, KeyboardEvent, Marks,
    Modifiers, MountHandle, NotificationCapability, Notifier, Permission, QuickAddResponse,
    RecordingHost, SeverityTier, TransportError,
};

// =============================================================================
// FAKE CAPABILITIES
// =============================================================================

struct FakeTransport {
    response: RefCell<Result<QuickAddResponse, TransportError>>,
    posts: RefCell<Vec<FormSubmission>>,
}

impl FakeTransport {
    fn answering(response: Result<QuickAddResponse, TransportError>) -> Rc<Self> {
        Rc::new(Self {
            response: RefCell::new(response),
            posts: RefCell::new(Vec::new()),
        })
    }
}

#[async_trait(?Send)]
impl FormTransport for FakeTransport {
    async fn post_form(&self, submission: &FormSubmission) -> Result<QuickAddResponse, TransportError> {
        self.posts.borrow_mut().push(submission.clone());
        sleep(Duration::from_millis(30)).await;
        self.response.borrow().clone()
    }
}

struct FakeNotifier {
    sent: RefCell<Vec<String>>,
    permission: Cell<Permission>,
}

impl Notifier for FakeNotifier {
    fn permission(&self) -> Permission {
        self.permission.get()
    }

    fn notify(&self, _title: &str, body: &str) {
        self.sent.borrow_mut().push(body.to_string());
    }
}

// =============================================================================
// PAGE FIXTURE
// =============================================================================

struct InventoryPage {
    rows: Vec<usize>,
    quantity_cells: Vec<usize>,
    delete_button: usize,
    search: usize,
    category: usize,
    alert: usize,
    barcode: usize,
    quick_add_form: usize,
    quick_add_button: usize,
}

fn build_page() -> InventoryPage {
    reset_page();

    create(ElementSpec::link("/inventory/products/new/").class(classes::BTN_ADD));

    let filter_form = create(
        ElementSpec::new(ElementKind::Form)
            .class(classes::FILTER_FORM)
            .attr(attrs::ACTION, "/inventory/products/"),
    );
    let (search, category) = within(filter_form, || {
        (
            create(ElementSpec::input(InputType::Text).name("q")),
            create(ElementSpec::new(ElementKind::Select).name("category").value("")),
        )
    });

    let alert = create(
        ElementSpec::new(ElementKind::Div)
            .id("alert-7")
            .class(classes::STOCK_ALERT)
            .attr(attrs::DATA_PRODUCT_NAME, "Hex bolt M8")
            .attr(attrs::DATA_REMAINING, "2")
            .attr(attrs::DATA_THRESHOLD, "10"),
    );

    let table = create(ElementSpec::new(ElementKind::Table).class(classes::PRODUCT_TABLE));
    let mut rows = Vec::new();
    let mut quantity_cells = Vec::new();
    let mut delete_button = 0;
    within(table, || {
        let body = create(ElementSpec::new(ElementKind::TableBody));
        within(body, || {
            for (id, name, quantity, reorder) in [
                (7, "Hex bolt M8", "2", "10"),
                (8, "Nut M8", "4", "5"),
                (9, "Washer", "40", "5"),
                (10, "Gasket", "n/a", "5"),
            ] {
                let row = create(
                    ElementSpec::new(ElementKind::TableRow)
                        .attr(attrs::DATA_URL, &format!("/inventory/products/{id}/")),
                );
                within(row, || {
                    create(ElementSpec::cell("", name));
                    quantity_cells.push(create(ElementSpec::cell(classes::STOCK_QUANTITY, quantity)));
                    create(ElementSpec::cell(classes::REORDER_LEVEL, reorder));
                    let actions = create(ElementSpec::cell(classes::NO_ROW_CLICK, ""));
                    within(actions, || {
                        delete_button = create(
                            ElementSpec::link(&format!("/inventory/products/{id}/delete/"))
                                .class(classes::BTN_DELETE)
                                .attr(attrs::DATA_PRODUCT_NAME, name),
                        );
                    });
                });
                rows.push(row);
            }
        });
    });

    let scan_form = create(
        ElementSpec::new(ElementKind::Form)
            .attr(attrs::ACTION, "/inventory/scan/")
            .attr(attrs::METHOD, "post"),
    );
    let barcode = within(scan_form, || {
        create(ElementSpec::input(InputType::Text).class(classes::BARCODE_INPUT).name("barcode"))
    });

    let quick_add_form = create(
        ElementSpec::new(ElementKind::Form)
            .class(classes::QUICK_ADD_FORM)
            .attr(attrs::ACTION, "/inventory/quick-add/")
            .attr(attrs::METHOD, "post"),
    );
    let quick_add_button = within(quick_add_form, || {
        create(ElementSpec::input(InputType::Text).name("sku").value("WSH-10"));
        create(ElementSpec::input(InputType::Submit).value("Add"))
    });

    InventoryPage {
        rows,
        quantity_cells,
        delete_button,
        search,
        category,
        alert,
        barcode,
        quick_add_form,
        quick_add_button,
    }
}

fn mount_page(
    host: &Rc<RecordingHost>,
    transport: Rc<FakeTransport>,
    capabilities: Capabilities,
) -> MountHandle {
    mount_with_transport(ControllerConfig::default(), host.clone(), transport, capabilities)
}

fn icons_in(cell: usize) -> usize {
    page::by_class(Some(cell), classes::STOCK_ALERT_ICON).len()
}

// =============================================================================
// STOCK LEVELS
// =============================================================================

#[test]
fn mount_classifies_rows() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let _handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), Capabilities::default());

    let tiers: Vec<SeverityTier> = p.rows.iter().map(|&r| row_tier(r)).collect();
    assert_eq!(
        tiers,
        vec![SeverityTier::Critical, SeverityTier::Low, SeverityTier::Normal, SeverityTier::Normal]
    );

    assert_eq!(icons_in(p.quantity_cells[0]), 1);
    let icon = page::by_class(Some(p.quantity_cells[0]), classes::STOCK_ALERT_ICON)[0];
    assert_eq!(page::text_content(icon), ALERT_ICON);
    assert_eq!(icons_in(p.quantity_cells[1]), 0);
}

#[test]
fn refresh_follows_host_mutations_without_duplicates() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), Capabilities::default());

    handle.refresh();
    handle.refresh();
    assert_eq!(icons_in(p.quantity_cells[0]), 1);

    page::set_text(p.quantity_cells[0], "25");
    page::set_text(p.quantity_cells[2], "1");
    handle.refresh();

    assert_eq!(row_tier(p.rows[0]), SeverityTier::Normal);
    assert_eq!(icons_in(p.quantity_cells[0]), 0);
    assert_eq!(row_tier(p.rows[2]), SeverityTier::Critical);
    assert_eq!(icons_in(p.quantity_cells[2]), 1);
}

// =============================================================================
// ALERTS
// =============================================================================

#[test]
fn low_stock_alert_notifies_once_per_page_load() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let notifier = Rc::new(FakeNotifier {
        sent: RefCell::new(Vec::new()),
        permission: Cell::new(Permission::Granted),
    });
    let capabilities = Capabilities {
        notifications: NotificationCapability::Available(notifier.clone()),
        ..Capabilities::default()
    };

    let handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), capabilities);
    assert!(interaction::get_marks(p.alert).contains(Marks::ALERT_ACTIVE));
    assert!(handle.has_notified(p.alert));

    assert_eq!(handle.refresh(), 0);
    assert_eq!(
        notifier.sent.borrow().as_slice(),
        &["Hex bolt M8 is low on stock (2 remaining)".to_string()]
    );
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[test]
fn row_click_and_delete_confirmation() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), Capabilities::default());

    let name_cell = page::children(p.rows[1])[0];
    handle.click(name_cell);
    assert_eq!(host.take_actions(), vec![HostAction::Navigate { url: "/inventory/products/8/".into() }]);

    // Delete sits in a .no-row-click cell: only the confirm runs
    host.queue_answer(true);
    assert!(handle.click(p.delete_button));
    assert_eq!(
        host.take_actions(),
        vec![
            HostAction::Confirm {
                message: "Are you sure you want to delete Gasket?".into(),
                answer: true,
            },
            HostAction::Navigate { url: "/inventory/products/10/delete/".into() },
        ]
    );
}

#[test]
fn shortcut_opens_new_product_page() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), Capabilities::default());

    assert!(!handle.key_press(KeyboardEvent::with_modifiers("n", Modifiers::ctrl_alt()).on(p.search)));
    assert!(host.actions().is_empty());

    assert!(handle.key_press(KeyboardEvent::with_modifiers("n", Modifiers::ctrl_alt())));
    assert_eq!(host.navigations(), vec!["/inventory/products/new/".to_string()]);
}

// =============================================================================
// FILTERS AND SCANNER
// =============================================================================

#[tokio::test(start_paused = true)]
async fn filters_debounce_text_and_submit_discrete_changes() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());

    LocalSet::new()
        .run_until(async {
            let handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), Capabilities::default());

            for text in ["h", "he", "hex"] {
                handle.input_text(p.search, text);
                sleep(Duration::from_millis(200)).await;
            }
            assert!(host.submissions().is_empty());

            handle.change(p.category, "fasteners");
            assert_eq!(host.submissions().len(), 1);
            assert_eq!(host.submissions()[0].field("q"), Some("hex"));

            sleep(Duration::from_millis(400)).await;
            let submissions = host.submissions();
            assert_eq!(submissions.len(), 2);
            assert_eq!(submissions[1].field("category"), Some("fasteners"));
            assert_eq!(submissions[1].action, "/inventory/products/");
        })
        .await;
}

#[test]
fn scanner_burst_submits_scan_form() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let handle = mount_page(&host, FakeTransport::answering(Ok(QuickAddResponse::accepted())), Capabilities::default());

    handle.input_text(p.barcode, "4006381333931");
    handle.key_press(KeyboardEvent::new("Enter").on(p.barcode).at(5_000));
    handle.key_press(KeyboardEvent::new("Enter").on(p.barcode).at(5_400));
    assert!(host.submissions().is_empty());

    handle.key_press(KeyboardEvent::new("Enter").on(p.barcode).at(5_430));
    let submissions = host.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].action, "/inventory/scan/");
    assert_eq!(submissions[0].field("barcode"), Some("4006381333931"));
}

// =============================================================================
// QUICK ADD
// =============================================================================

async fn quick_add_round(response: Result<QuickAddResponse, TransportError>) -> Rc<RecordingHost> {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let transport = FakeTransport::answering(response);

    LocalSet::new()
        .run_until(async {
            let handle = mount_page(&host, transport.clone(), Capabilities::default());

            // The click itself is not prevented; the submit it triggers is
            assert!(!handle.click(p.quick_add_button));
            sleep(Duration::from_millis(5)).await;
            assert!(page::is_disabled(p.quick_add_button));
            assert_eq!(page::value(p.quick_add_button), "Processing...");

            // Disabled control swallows a second click
            assert!(handle.click(p.quick_add_button));

            sleep(Duration::from_millis(100)).await;
            assert!(!page::is_disabled(p.quick_add_button));
            assert_eq!(page::value(p.quick_add_button), "Add");
        })
        .await;

    assert_eq!(transport.posts.borrow().len(), 1);
    assert_eq!(transport.posts.borrow()[0].form, p.quick_add_form);
    assert_eq!(transport.posts.borrow()[0].field("sku"), Some("WSH-10"));
    // Native submission never happens
    assert!(host.submissions().is_empty());
    host
}

#[tokio::test(start_paused = true)]
async fn quick_add_success_reloads() {
    let host = quick_add_round(Ok(QuickAddResponse::accepted())).await;
    assert_eq!(host.actions(), vec![HostAction::Reload]);
}

#[tokio::test(start_paused = true)]
async fn quick_add_rejection_alerts_message() {
    let host = quick_add_round(Ok(QuickAddResponse::rejected(Some("Out of stock")))).await;
    assert_eq!(host.actions(), vec![HostAction::Alert { message: "Out of stock".into() }]);
}

#[tokio::test(start_paused = true)]
async fn quick_add_transport_error_alerts_generic_message() {
    let host = quick_add_round(Err(TransportError::Status(502))).await;
    assert_eq!(
        host.actions(),
        vec![HostAction::Alert {
            message: "There was an error processing your request".into()
        }]
    );
}
