//! Stock Classifier - Severity tiers for inventory rows.
//!
//! Reads the quantity and reorder level cells of each row, marks the row
//! [`Marks::LOW_STOCK`] or [`Marks::CRITICAL_STOCK`] and gives critical rows
//! a warning icon inside the quantity cell.
//!
//! A pass first clears what a previous pass applied, so re-running it after
//! the host mutates the document never stacks icons.

use tracing::{debug, trace};

use crate::config::StockConfig;
use crate::engine::arrays::interaction;
use crate::page::{self, ElementSpec};
use crate::types::{classes, ElementKind, Marks, SeverityTier};

/// Text of the warning icon.
pub const ALERT_ICON: &str = "⚠️";

// =============================================================================
// Parsing
// =============================================================================

/// Parse the leading integer of `text`: optional whitespace, optional sign,
/// then digits. Anything after the digits is ignored. `None` if no digits.
/// Out-of-range values saturate at `i64::MIN` / `i64::MAX`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    // Accumulate with the sign applied so i64::MIN itself is reachable
    let value = rest[..end].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        }
    });
    Some(value)
}

/// Parse a level, falling back to `fallback` when the text has no integer
/// or the integer is zero.
pub fn parse_level(text: &str, fallback: i64) -> i64 {
    match parse_leading_int(text) {
        Some(0) | None => fallback,
        Some(level) => level,
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Threshold pair used by [`classify_tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Reorder level used when a row has none.
    pub low: i64,
    pub critical: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&StockConfig::default())
    }
}

impl From<&StockConfig> for Thresholds {
    fn from(config: &StockConfig) -> Self {
        Self {
            low: config.low_stock_threshold,
            critical: config.critical_stock_threshold,
        }
    }
}

/// Tier of a row. A missing quantity is always [`SeverityTier::Normal`].
pub fn classify_tier(quantity: Option<i64>, reorder_level: i64, thresholds: Thresholds) -> SeverityTier {
    match quantity {
        None => SeverityTier::Normal,
        Some(q) if q <= thresholds.critical => SeverityTier::Critical,
        Some(q) if q <= reorder_level => SeverityTier::Low,
        Some(_) => SeverityTier::Normal,
    }
}

/// A row together with its two data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockRow {
    pub row: usize,
    pub quantity_cell: usize,
    pub reorder_cell: usize,
}

impl StockRow {
    /// Locate the data cells of `row`. `None` unless both are present.
    pub fn locate(row: usize) -> Option<Self> {
        let quantity_cell = page::by_class(Some(row), classes::STOCK_QUANTITY).into_iter().next()?;
        let reorder_cell = page::by_class(Some(row), classes::REORDER_LEVEL).into_iter().next()?;
        Some(Self { row, quantity_cell, reorder_cell })
    }
}

/// Body rows of `table` that carry stock data.
pub fn find_rows(table: usize) -> Vec<StockRow> {
    page::query_all(Some(table), |i| {
        page::kind(i) == ElementKind::TableRow
            && page::closest(i, |a| page::kind(a) == ElementKind::TableBody).is_some()
    })
    .into_iter()
    .filter_map(StockRow::locate)
    .collect()
}

/// Classify `rows`, replacing any marks and icons from a previous pass.
pub fn classify(rows: &[StockRow], thresholds: Thresholds) {
    for row in rows {
        interaction::remove_marks(row.row, Marks::TIER);
        for icon in page::by_class(Some(row.quantity_cell), classes::STOCK_ALERT_ICON) {
            page::remove(icon);
        }

        let quantity = parse_leading_int(&page::text_content(row.quantity_cell));
        let reorder_level = parse_level(&page::text_content(row.reorder_cell), thresholds.low);
        let tier = classify_tier(quantity, reorder_level, thresholds);

        trace!(row = row.row, ?quantity, reorder_level, %tier, "classified row");

        interaction::insert_marks(row.row, tier.mark());
        if tier == SeverityTier::Critical {
            page::create(
                ElementSpec::new(ElementKind::Span)
                    .class(classes::STOCK_ALERT_ICON)
                    .class("tw-ml-2")
                    .text(ALERT_ICON)
                    .parent(row.quantity_cell),
            );
        }
    }
}

/// Classify every stock row of `table`.
pub fn classify_table(table: usize, thresholds: Thresholds) {
    let rows = find_rows(table);
    classify(&rows, thresholds);
    debug!(table, rows = rows.len(), "stock levels highlighted");
}

/// Tier currently rendered on `row`.
pub fn row_tier(row: usize) -> SeverityTier {
    let marks = interaction::get_marks(row);
    if marks.contains(Marks::CRITICAL_STOCK) {
        SeverityTier::Critical
    } else if marks.contains(Marks::LOW_STOCK) {
        SeverityTier::Low
    } else {
        SeverityTier::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{create, reset_page, within};

    fn setup() -> usize {
        reset_page();
        create(ElementSpec::new(ElementKind::Table).class(classes::PRODUCT_TABLE))
    }

    fn add_row(table: usize, quantity: &str, reorder: &str) -> usize {
        within(table, || {
            let body = create(ElementSpec::new(ElementKind::TableBody));
            within(body, || {
                let row = create(ElementSpec::new(ElementKind::TableRow));
                within(row, || {
                    create(ElementSpec::cell("", "Hex bolt M8"));
                    create(ElementSpec::cell(classes::STOCK_QUANTITY, quantity));
                    create(ElementSpec::cell(classes::REORDER_LEVEL, reorder));
                });
                row
            })
        })
    }

    fn icons(row: usize) -> usize {
        page::by_class(Some(row), classes::STOCK_ALERT_ICON).len()
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  7 units"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("n/a"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_leading_int("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn test_parse_level_falls_back_on_zero_and_garbage() {
        assert_eq!(parse_level("10", 5), 10);
        assert_eq!(parse_level("0", 5), 5);
        assert_eq!(parse_level("none", 5), 5);
    }

    #[test]
    fn test_classify_tier() {
        let t = Thresholds::default();
        assert_eq!(classify_tier(Some(2), 5, t), SeverityTier::Critical);
        assert_eq!(classify_tier(Some(0), 5, t), SeverityTier::Critical);
        assert_eq!(classify_tier(Some(-1), 5, t), SeverityTier::Critical);
        assert_eq!(classify_tier(Some(3), 5, t), SeverityTier::Low);
        assert_eq!(classify_tier(Some(5), 5, t), SeverityTier::Low);
        assert_eq!(classify_tier(Some(6), 5, t), SeverityTier::Normal);
        assert_eq!(classify_tier(None, 5, t), SeverityTier::Normal);
        let huge_deficit = parse_leading_int("-99999999999999999999");
        assert_eq!(classify_tier(huge_deficit, 5, t), SeverityTier::Critical);
    }

    #[test]
    fn test_critical_wins_over_low_reorder_level() {
        // Reorder level below the critical threshold still yields Critical
        assert_eq!(classify_tier(Some(2), 1, Thresholds::default()), SeverityTier::Critical);
    }

    #[test]
    fn test_classify_table_marks_rows() {
        let table = setup();
        let critical = add_row(table, "2", "5");
        let low = add_row(table, "3", "5");
        let normal = add_row(table, "6", "5");
        let junk = add_row(table, "n/a", "5");

        classify_table(table, Thresholds::default());

        assert_eq!(row_tier(critical), SeverityTier::Critical);
        assert_eq!(row_tier(low), SeverityTier::Low);
        assert_eq!(row_tier(normal), SeverityTier::Normal);
        assert_eq!(row_tier(junk), SeverityTier::Normal);

        assert_eq!(icons(critical), 1);
        assert_eq!(icons(low), 0);

        let icon = page::by_class(Some(critical), classes::STOCK_ALERT_ICON)[0];
        assert_eq!(page::text_content(icon), ALERT_ICON);
        assert!(page::has_class(icon, "tw-ml-2"));
        let quantity_cell = StockRow::locate(critical).unwrap().quantity_cell;
        assert!(page::is_within(icon, quantity_cell));
    }

    #[test]
    fn test_reclassify_is_idempotent() {
        let table = setup();
        let row = add_row(table, "1", "5");

        classify_table(table, Thresholds::default());
        classify_table(table, Thresholds::default());
        classify_table(table, Thresholds::default());

        assert_eq!(row_tier(row), SeverityTier::Critical);
        assert_eq!(icons(row), 1);
    }

    #[test]
    fn test_reclassify_after_restock_clears_icon() {
        let table = setup();
        let row = add_row(table, "1", "5");
        classify_table(table, Thresholds::default());

        let cell = StockRow::locate(row).unwrap().quantity_cell;
        page::set_text(cell, "40");
        classify_table(table, Thresholds::default());

        assert_eq!(row_tier(row), SeverityTier::Normal);
        assert_eq!(icons(row), 0);
    }

    #[test]
    fn test_rows_missing_a_cell_are_skipped() {
        let table = setup();
        let row = within(table, || {
            let body = create(ElementSpec::new(ElementKind::TableBody));
            within(body, || {
                let row = create(ElementSpec::new(ElementKind::TableRow));
                within(row, || create(ElementSpec::cell(classes::STOCK_QUANTITY, "0")));
                row
            })
        });

        assert!(find_rows(table).is_empty());
        classify_table(table, Thresholds::default());
        assert_eq!(row_tier(row), SeverityTier::Normal);
    }

    #[test]
    fn test_header_rows_are_ignored() {
        let table = setup();
        within(table, || {
            let header = create(ElementSpec::new(ElementKind::TableRow));
            within(header, || {
                create(ElementSpec::cell(classes::STOCK_QUANTITY, "Qty"));
                create(ElementSpec::cell(classes::REORDER_LEVEL, "Reorder"));
            });
        });
        let row = add_row(table, "4", "0");

        assert_eq!(find_rows(table).len(), 1);
        classify_table(table, Thresholds::default());
        // Zero reorder level falls back to 5
        assert_eq!(row_tier(row), SeverityTier::Low);
    }

    #[test]
    fn test_other_marks_survive_classification() {
        let table = setup();
        let row = add_row(table, "9", "5");
        interaction::insert_marks(row, Marks::ALERT_ACTIVE);

        classify_table(table, Thresholds::default());
        assert!(interaction::get_marks(row).contains(Marks::ALERT_ACTIVE));
    }
}
