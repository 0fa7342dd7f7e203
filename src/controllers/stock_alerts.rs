//! Stock Alerts - Low-stock widgets and system notifications.
//!
//! A `.stock-alert` widget whose `data-remaining` is at or below its
//! `data-threshold` is marked [`Marks::ALERT_ACTIVE`]. If notifications are
//! available and permitted, it also raises one notification per page load.
//! The "already notified" latch lives in the [`AlertMonitor`], keyed by the
//! widget's element serial (markup ids may repeat), and is never reset.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::AlertConfig;
use crate::engine::{self, arrays::interaction};
use crate::host::{NotificationCapability, Permission};
use crate::page;
use crate::types::{attrs, classes, Marks, LOW_STOCK_THRESHOLD};

use super::stock_classifier::parse_level;

/// Data read from one alert widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAlert {
    pub element: usize,
    pub remaining: i64,
    pub threshold: i64,
    pub product_name: String,
}

impl StockAlert {
    /// Read the widget's data attributes. Missing or unparsable values
    /// default to 0 remaining and `default_threshold`.
    pub fn read(element: usize, default_threshold: i64) -> Self {
        let data = |name: &str| page::attr(element, name).unwrap_or_default();
        Self {
            element,
            remaining: parse_level(&data(attrs::DATA_REMAINING), 0),
            threshold: parse_level(&data(attrs::DATA_THRESHOLD), default_threshold),
            product_name: page::attr(element, attrs::DATA_PRODUCT_NAME)
                .unwrap_or_else(|| "Item".to_string()),
        }
    }

    pub fn is_low(&self) -> bool {
        self.remaining <= self.threshold
    }

    pub fn body(&self) -> String {
        format!(
            "{} is low on stock ({} remaining)",
            self.product_name, self.remaining
        )
    }
}

/// Owns the per-alert notification latch for one page load.
pub struct AlertMonitor {
    title: String,
    default_threshold: i64,
    notifications: NotificationCapability,
    notified: HashSet<u64>,
}

impl AlertMonitor {
    pub fn new(config: &AlertConfig, default_threshold: i64, notifications: NotificationCapability) -> Self {
        Self {
            title: config.title.clone(),
            default_threshold,
            notifications,
            notified: HashSet::new(),
        }
    }

    /// Whether `element` has already raised its notification.
    pub fn has_notified(&self, element: usize) -> bool {
        engine::get_serial(element).is_some_and(|serial| self.notified.contains(&serial))
    }

    /// Check every `.stock-alert` widget in the document.
    /// Returns the number of notifications raised.
    pub fn check_document(&mut self) -> usize {
        let alerts = page::by_class(None, classes::STOCK_ALERT);
        self.check(&alerts)
    }

    /// Check `alerts`, marking low ones and notifying each at most once.
    pub fn check(&mut self, alerts: &[usize]) -> usize {
        let mut raised = 0;

        for &element in alerts {
            let alert = StockAlert::read(element, self.default_threshold);
            if !alert.is_low() {
                interaction::remove_marks(element, Marks::ALERT_ACTIVE);
                continue;
            }
            interaction::insert_marks(element, Marks::ALERT_ACTIVE);

            let NotificationCapability::Available(notifier) = &self.notifications else {
                continue;
            };
            let Some(serial) = engine::get_serial(element) else {
                continue;
            };
            if self.notified.contains(&serial) || notifier.permission() != Permission::Granted {
                continue;
            }

            info!(
                alert = ?engine::get_id(element),
                remaining = alert.remaining,
                "low stock notification"
            );
            notifier.notify(&self.title, &alert.body());
            self.notified.insert(serial);
            raised += 1;
        }

        debug!(alerts = alerts.len(), raised, "stock alerts checked");
        raised
    }
}

impl Default for AlertMonitor {
    fn default() -> Self {
        Self::new(&AlertConfig::default(), LOW_STOCK_THRESHOLD, NotificationCapability::Unavailable)
    }
}
