//! # spark-inventory
//!
//! Stock-state and rapid-input controllers for server-rendered inventory and
//! order pages.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! the element arrays.
//!
//! ## Architecture
//!
//! The page is an in-process document: elements are indices into columnar
//! arrays (kind, parent, class, text, value, attributes, interaction state).
//! The host builds it from markup, mounts the controllers, delivers events and
//! receives side effects through [`PageHost`].
//!
//! ```text
//! markup → page::create → mount → events / keyboard → controllers → PageHost
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Element kinds, marks, severity tiers, markup contract
//! - [`engine`] - Element registry and parallel arrays
//! - [`page`] - Building, querying and default actions
//! - [`state`] - Keyboard, document events, debounce timers
//! - [`controllers`] - Stock classifier, scanner detection, filters, quick-add, ...
//! - [`pipeline`] - Mounting controllers on a document
//! - [`host`] / [`transport`] - Capabilities the host provides
//! - [`config`] / [`logging`] / [`error`] - TOML configuration, tracing setup, errors

pub mod config;
pub mod controllers;
pub mod engine;
pub mod error;
pub mod host;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod state;
pub mod transport;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::ControllerConfig;
pub use error::{ConfigError, LoggingError, TransportError};
pub use logging::{init_logging, LogConfig, LogFormat};

pub use engine::{
    allocate_index, get_allocated_indices, get_current_parent_index, get_id, get_index,
    get_serial, is_allocated, on_destroy, pop_parent_context, push_parent_context, release_index,
    reset_registry,
};

pub use page::{create, reset_page, within, ElementSpec};

pub use host::{
    Capabilities, ConfirmDialog, ConfirmPrompt, ConfirmRequest, HostAction, NotificationCapability,
    Notifier, PageHost, Permission, RecordingHost,
};

pub use transport::{FormTransport, HttpTransport, QuickAddResponse};

pub use controllers::Cleanup;
pub use controllers::quick_add::SubmitOutcome;
pub use controllers::rapid_entry::ScanSession;
pub use controllers::stock_alerts::AlertMonitor;
pub use controllers::stock_classifier::{classify, classify_tier, StockRow, Thresholds};

pub use pipeline::{mount, mount_with_transport, MountHandle};

pub use state::{EventKind, KeyState, KeyboardEvent, Modifiers, PageEvent};
