//! Page Module - Building and querying the document.
//!
//! The host turns server-rendered markup into elements with [`create`],
//! nesting them with [`within`]. Controllers locate their elements with the
//! query helpers re-exported from [`query`].
//!
//! # Example
//!
//! ```ignore
//! use spark_inventory::page::{self, ElementSpec};
//! use spark_inventory::types::ElementKind;
//!
//! let table = page::create(ElementSpec::new(ElementKind::Table).class("product-table"));
//! page::within(table, || {
//!     let body = page::create(ElementSpec::new(ElementKind::TableBody));
//!     page::within(body, || {
//!         let row = page::create(ElementSpec::new(ElementKind::TableRow));
//!         page::within(row, || {
//!             page::create(ElementSpec::cell("stock-quantity", "2"));
//!             page::create(ElementSpec::cell("reorder-level", "5"));
//!         });
//!     });
//! });
//! ```

pub mod defaults;
pub mod query;

pub use query::*;

use crate::engine::arrays::{attrs, core, interaction, text};
use crate::engine::{
    allocate_index, get_current_parent_index, on_destroy, pop_parent_context,
    push_parent_context, release_index, reset_registry,
};
use crate::state::{events, keyboard, timers};
use crate::types::{ElementKind, InputType};

// =============================================================================
// Element Spec
// =============================================================================

/// Description of one element to create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSpec {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub class_name: String,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub attrs: Vec<(String, String)>,
    /// Explicit parent. Falls back to the current [`within`] context.
    pub parent: Option<usize>,
}

impl ElementSpec {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, ..Self::default() }
    }

    /// `<input type=...>`
    pub fn input(input_type: InputType) -> Self {
        Self::new(ElementKind::Input(input_type))
    }

    /// `<td class=...>text</td>`
    pub fn cell(class: &str, text: &str) -> Self {
        Self::new(ElementKind::TableCell).class(class).text(text)
    }

    /// `<a href=...>`
    pub fn link(href: &str) -> Self {
        Self::new(ElementKind::Link).attr("href", href)
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Append a class to the class list.
    pub fn class(mut self, class: &str) -> Self {
        if !self.class_name.is_empty() {
            self.class_name.push(' ');
        }
        self.class_name.push_str(class);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Shorthand for the `name` attribute of form controls.
    pub fn name(self, name: &str) -> Self {
        self.attr("name", name)
    }

    pub fn parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }
}

// =============================================================================
// Building
// =============================================================================

/// Create an element and return its index.
pub fn create(spec: ElementSpec) -> usize {
    let index = allocate_index(spec.id.as_deref());
    let parent = spec.parent.or_else(get_current_parent_index);

    core::set_kind(index, spec.kind);
    core::set_parent_index(index, parent);
    core::set_class_name(index, spec.class_name);
    text::set_text_content(index, spec.text);
    text::set_value(index, spec.value);
    interaction::set_checked(index, spec.checked);
    interaction::set_disabled(index, spec.disabled);
    for (name, value) in spec.attrs {
        attrs::set_attr(index, &name, value);
    }

    // Listeners and timers die with the element
    on_destroy(index, move || {
        events::cleanup_index(index);
        keyboard::cleanup_index(index);
        timers::cancel(index);
    });

    index
}

/// Run `f` with `parent` as the default parent for created elements.
pub fn within<R>(parent: usize, f: impl FnOnce() -> R) -> R {
    push_parent_context(parent);
    let result = f();
    pop_parent_context();
    result
}

/// Remove an element and its subtree.
pub fn remove(index: usize) {
    release_index(index);
}

/// Replace the text content of an element (host-side DOM mutation).
pub fn set_text(index: usize, content: &str) {
    text::set_text_content(index, content.to_string());
}

/// Replace the value of a control (host-side DOM mutation).
pub fn set_value(index: usize, value: &str) {
    text::set_value(index, value.to_string());
}

/// Clear the whole document and every handler and timer attached to it.
pub fn reset_page() {
    timers::reset_timers();
    events::reset_events();
    keyboard::reset_keyboard_state();
    reset_registry();
}
