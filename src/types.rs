//! Core types for spark-inventory.
//!
//! These types define the document model the controllers read and mutate:
//! element kinds, applied marks, severity tiers and the markup contract.

use std::fmt;

use serde::Serialize;

// =============================================================================
// Thresholds
// =============================================================================

/// Reorder level assumed when a row carries no usable one.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Quantity at or below which a row is critical regardless of reorder level.
pub const CRITICAL_STOCK_THRESHOLD: i64 = 2;

/// Enter-to-Enter gap (ms) below which an Enter is treated as a scanner burst.
pub const BURST_GAP_MS: u64 = 100;

/// Quiet period (ms) before a free-text filter submits its form.
pub const FILTER_DEBOUNCE_MS: u64 = 500;

// =============================================================================
// Markup Contract
// =============================================================================

/// Class names the server markup uses to tag the elements controllers attach to.
pub mod classes {
    pub const PRODUCT_TABLE: &str = "product-table";
    pub const ORDER_TABLE: &str = "order-table";
    pub const STOCK_QUANTITY: &str = "stock-quantity";
    pub const REORDER_LEVEL: &str = "reorder-level";
    pub const STOCK_ALERT_ICON: &str = "stock-alert-icon";
    pub const STOCK_ALERT: &str = "stock-alert";
    pub const BTN_DELETE: &str = "btn-delete";
    pub const BTN_ADD: &str = "btn-add";
    pub const BTN_VIEW: &str = "btn-view";
    pub const FILTER_FORM: &str = "filter-form";
    pub const BARCODE_INPUT: &str = "barcode-input";
    pub const QUICK_ADD_FORM: &str = "quick-add-form";
    pub const NO_ROW_CLICK: &str = "no-row-click";
}

/// Attribute names read from the markup.
pub mod attrs {
    pub const HREF: &str = "href";
    pub const ACTION: &str = "action";
    pub const METHOD: &str = "method";
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const DATA_URL: &str = "data-url";
    pub const DATA_PRODUCT_NAME: &str = "data-product-name";
    pub const DATA_REMAINING: &str = "data-remaining";
    pub const DATA_THRESHOLD: &str = "data-threshold";
}

// =============================================================================
// Element Kind
// =============================================================================

/// `type` attribute of an `<input>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    #[default]
    Text,
    Search,
    Number,
    Checkbox,
    Radio,
    Date,
    Hidden,
    File,
    Submit,
    Button,
}

impl InputType {
    /// Parse a markup `type` attribute. Unknown types behave like text, as in HTML.
    pub fn from_attr(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "search" => Self::Search,
            "number" => Self::Number,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "date" => Self::Date,
            "hidden" => Self::Hidden,
            "file" => Self::File,
            "submit" => Self::Submit,
            "button" => Self::Button,
            _ => Self::Text,
        }
    }

    /// Free-text inputs fire `input` events per keystroke.
    pub fn is_free_text(self) -> bool {
        matches!(self, Self::Text | Self::Search)
    }

    /// Inputs whose value is only sent when checked.
    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// Element kind (stored in the core kind array).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    Table,
    TableBody,
    TableRow,
    TableCell,
    Form,
    Input(InputType),
    Select,
    TextArea,
    Button,
    Link,
    Span,
    #[default]
    Div,
}

impl ElementKind {
    /// Controls that carry a value into a form submission.
    pub fn is_form_control(self) -> bool {
        matches!(self, Self::Input(_) | Self::Select | Self::TextArea)
    }

    /// Elements that submit their form when activated.
    pub fn is_submit_control(self) -> bool {
        matches!(self, Self::Button | Self::Input(InputType::Submit))
    }

    /// Elements that accept typed text (keyboard shortcuts are suppressed there).
    pub fn accepts_text(self) -> bool {
        matches!(self, Self::Input(_) | Self::TextArea)
    }
}

// =============================================================================
// Marks (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Visual state applied by controllers, kept apart from server class names
    /// so a classification pass can clear exactly what it set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Marks: u8 {
        const NONE = 0;
        const LOW_STOCK = 1 << 0;
        const CRITICAL_STOCK = 1 << 1;
        const ALERT_ACTIVE = 1 << 2;
    }
}

impl Marks {
    /// Marks owned by the stock classifier.
    pub const TIER: Self = Self::LOW_STOCK.union(Self::CRITICAL_STOCK);
}

// =============================================================================
// Severity Tier
// =============================================================================

/// Stock severity of a row. Ordered `Normal < Low < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    #[default]
    Normal,
    Low,
    Critical,
}

impl SeverityTier {
    /// The row mark that renders this tier.
    pub fn mark(self) -> Marks {
        match self {
            Self::Normal => Marks::NONE,
            Self::Low => Marks::LOW_STOCK,
            Self::Critical => Marks::CRITICAL_STOCK,
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Low => write!(f, "low"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

// =============================================================================
// Form Submission
// =============================================================================

/// Snapshot of a form as the browser would submit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    /// Index of the submitted form.
    pub form: usize,
    /// Declared action (may be relative).
    pub action: String,
    /// Declared method, upper-cased (`GET` when absent).
    pub method: String,
    /// Successful controls in document order.
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// First value submitted under `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
