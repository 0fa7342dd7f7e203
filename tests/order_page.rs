//! Order list page: clickable rows, status filter, rich delete dialog and
//! configuration loaded from TOML.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::task::LocalSet;

use spark_inventory::types::{attrs, classes};
use spark_inventory::{
    create, mount, reset_page, within, Capabilities, ConfirmDialog, ConfirmPrompt, ConfirmRequest,
    ControllerConfig, ElementKind, ElementSpec, InputType, RecordingHost,
};

struct OrderPage {
    order_cell: usize,
    view_link: usize,
    status: usize,
    delete_button: usize,
}

fn build_page() -> OrderPage {
    reset_page();

    let form = create(ElementSpec::new(ElementKind::Form).attr(attrs::ACTION, "/orders/"));
    let status = within(form, || {
        create(ElementSpec::input(InputType::Hidden).name("page").value("2"));
        create(ElementSpec::new(ElementKind::Select).name("status").value("all"))
    });

    let table = create(ElementSpec::new(ElementKind::Table).class(classes::ORDER_TABLE));
    let (order_cell, view_link, delete_button) = within(table, || {
        let row = create(ElementSpec::new(ElementKind::TableRow));
        within(row, || {
            let order_cell = create(ElementSpec::cell("", "#1042"));
            let actions = create(ElementSpec::cell("", ""));
            within(actions, || {
                let view = create(ElementSpec::link("/orders/1042/").class(classes::BTN_VIEW));
                let delete = create(
                    ElementSpec::link("/orders/1042/delete/")
                        .class(classes::BTN_DELETE)
                        .attr(attrs::DATA_PRODUCT_NAME, "order #1042"),
                );
                (order_cell, view, delete)
            })
        })
    });

    OrderPage { order_cell, view_link, status, delete_button }
}

struct AlwaysConfirm {
    seen: RefCell<Vec<ConfirmRequest>>,
}

#[async_trait(?Send)]
impl ConfirmPrompt for AlwaysConfirm {
    async fn confirm(&self, request: &ConfirmRequest) -> bool {
        self.seen.borrow_mut().push(request.clone());
        true
    }
}

const CONFIG: &str = r##"
[quick_add]
base_url = "https://shop.example.com/orders/"

[delete]
title = "Delete order"
confirm_color = "#dc2626"
"##;

#[tokio::test]
async fn order_page_behaviors() {
    let p = build_page();
    let host = Rc::new(RecordingHost::new());
    let dialog = Rc::new(AlwaysConfirm { seen: RefCell::new(Vec::new()) });

    let config = ControllerConfig::from_toml_str(CONFIG).unwrap();
    let capabilities = Capabilities {
        confirm_dialog: ConfirmDialog::Available(dialog.clone()),
        ..Capabilities::default()
    };

    LocalSet::new()
        .run_until(async {
            let handle = mount(config, host.clone(), capabilities).unwrap();

            // Row click opens the order
            handle.click(p.order_cell);
            assert_eq!(host.navigations(), vec!["/orders/1042/".to_string()]);
            host.take_actions();

            // Clicking the view link itself is the link's own navigation
            assert!(!handle.click(p.view_link));
            assert_eq!(host.navigations(), vec!["/orders/1042/".to_string()]);
            host.take_actions();

            // Status filter submits immediately
            handle.change(p.status, "shipped");
            let submissions = host.submissions();
            assert_eq!(submissions.len(), 1);
            assert_eq!(submissions[0].field("status"), Some("shipped"));
            assert_eq!(submissions[0].field("page"), Some("2"));
            host.take_actions();

            // Rich dialog, configured strings
            assert!(handle.click(p.delete_button));
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
            let seen = dialog.seen.borrow();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].title, "Delete order");
            assert_eq!(seen[0].text, "Are you sure you want to delete order #1042?");
            assert_eq!(seen[0].confirm_color, "#dc2626");
            assert_eq!(host.navigations(), vec!["/orders/1042/delete/".to_string()]);
        })
        .await;
}

#[test]
fn mount_rejects_bad_base_url() {
    reset_page();
    let config = ControllerConfig::from_toml_str("[quick_add]\nbase_url = \"::nope\"").unwrap();
    let result = mount(config, Rc::new(RecordingHost::new()), Capabilities::default());
    assert!(result.is_err());
}
