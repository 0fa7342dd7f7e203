//! Controller configuration.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! behavior the markup contract expects. Loaded from TOML:
//!
//! ```toml
//! [stock]
//! low_stock_threshold = 5
//! critical_stock_threshold = 2
//!
//! [scanner]
//! burst_gap_ms = 100
//!
//! [filters]
//! debounce_ms = 500
//!
//! [quick_add]
//! base_url = "https://shop.example.com/"
//! timeout_ms = 10000
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogConfig;
use crate::types::{
    BURST_GAP_MS, CRITICAL_STOCK_THRESHOLD, FILTER_DEBOUNCE_MS, LOW_STOCK_THRESHOLD,
};

/// Top-level configuration for every controller mounted on a page.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    pub stock: StockConfig,
    pub scanner: ScannerConfig,
    pub filters: FilterConfig,
    pub quick_add: QuickAddConfig,
    pub alerts: AlertConfig,
    pub delete: DeleteConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StockConfig {
    /// Reorder level assumed when a row carries none.
    pub low_stock_threshold: i64,
    /// Quantity at or below which a row is critical.
    pub critical_stock_threshold: i64,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            critical_stock_threshold: CRITICAL_STOCK_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScannerConfig {
    /// Enter-to-Enter gap below which input is a scanner burst.
    pub burst_gap_ms: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            burst_gap_ms: BURST_GAP_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    /// Quiet period before a free-text filter submits.
    pub debounce_ms: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            debounce_ms: FILTER_DEBOUNCE_MS,
        }
    }
}

impl FilterConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct QuickAddConfig {
    /// Submit label while the exchange is in flight.
    pub busy_label: String,
    /// Shown when the server rejects without a message.
    pub fallback_error: String,
    /// Shown on any transport failure.
    pub transport_error: String,
    /// Base the form action is resolved against.
    pub base_url: String,
    /// HTTP client timeout. `None` leaves the client default.
    pub timeout_ms: Option<u64>,
}

impl Default for QuickAddConfig {
    fn default() -> Self {
        Self {
            busy_label: "Processing...".to_string(),
            fallback_error: "Error adding item".to_string(),
            transport_error: "There was an error processing your request".to_string(),
            base_url: "http://localhost/".to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AlertConfig {
    pub title: String,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            title: "Low Stock Alert".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DeleteConfig {
    pub title: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub confirm_color: String,
    /// Item name used when the button carries none.
    pub fallback_name: String,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            title: "Confirm Deletion".to_string(),
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
            confirm_color: "#ef4444".to_string(),
            fallback_name: "this item".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock.critical_stock_threshold > self.stock.low_stock_threshold {
            return Err(ConfigError::Invalid(format!(
                "critical_stock_threshold ({}) exceeds low_stock_threshold ({})",
                self.stock.critical_stock_threshold, self.stock.low_stock_threshold
            )));
        }
        if self.scanner.burst_gap_ms == 0 {
            return Err(ConfigError::Invalid("burst_gap_ms must be positive".to_string()));
        }
        if self.filters.debounce_ms == 0 {
            return Err(ConfigError::Invalid("debounce_ms must be positive".to_string()));
        }
        Ok(())
    }
}
