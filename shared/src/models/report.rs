//! Sales Report Models

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which slice of the sales log a report covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind")]
pub enum ReportScope {
    /// A calendar month (UTC)
    Month { year: i32, month: u32 },
    /// A calendar day (UTC)
    Day { date: NaiveDate },
}

impl ReportScope {
    /// Scope label used in export filenames: `YYYY-MM` or `YYYY-MM-DD`
    pub fn label(&self) -> String {
        match self {
            ReportScope::Month { year, month } => format!("{year:04}-{month:02}"),
            ReportScope::Day { date } => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Whether a UTC confirmation instant falls inside this scope
    pub fn contains(&self, date_utc: chrono::DateTime<chrono::Utc>) -> bool {
        match self {
            ReportScope::Month { year, month } => {
                date_utc.year() == *year && date_utc.month() == *month
            }
            ReportScope::Day { date } => date_utc.date_naive() == *date,
        }
    }
}

/// One entry in the popular items ranking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularItem {
    pub name: String,
    /// Summed quantity across the filtered orders
    pub quantity: i64,
}

/// One row of the order-details listing (report pages and the daily
/// summary handed to the notification relay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_id: u64,
    /// Confirmation instant, Unix milliseconds
    pub date: i64,
    /// Distinct line count (matches the original report tables)
    pub item_lines: usize,
    /// Total unit count
    pub item_count: i32,
    pub total: Decimal,
    pub payment_method: Option<String>,
}

/// Aggregate sales report over a filtered, paginated slice of the log
///
/// An empty filtered set is a valid report: zero totals, no average,
/// empty rankings, one empty page. It is the defined "no data" state,
/// never a division by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub scope: ReportScope,
    pub total_sales: Decimal,
    pub order_count: usize,
    /// Defined only when `order_count > 0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_order: Option<Decimal>,
    pub popular_items: Vec<PopularItem>,
    /// Chronological order details for the requested page
    pub orders: Vec<OrderDetail>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl SalesReport {
    /// Whether the filtered set was empty (the "no data" report state)
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }
}

/// Daily summary handed to the notification relay
///
/// The relay formats and transmits this on its own schedule; the core
/// only computes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub restaurant_name: String,
    pub total_orders: usize,
    pub total_sales: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_order: Option<Decimal>,
    pub popular_items: Vec<PopularItem>,
    pub order_details: Vec<OrderDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scope_contains_month_and_day() {
        let instant = chrono::Utc
            .with_ymd_and_hms(2024, 3, 15, 9, 30, 0)
            .unwrap();

        assert!(ReportScope::Month { year: 2024, month: 3 }.contains(instant));
        assert!(!ReportScope::Month { year: 2024, month: 4 }.contains(instant));

        let day = ReportScope::Day {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        assert!(day.contains(instant));
        assert!(!day.contains(instant + chrono::Duration::days(1)));
    }

    #[test]
    fn scope_label_formats() {
        assert_eq!(ReportScope::Month { year: 2024, month: 3 }.label(), "2024-03");
        assert_eq!(
            ReportScope::Day {
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
            }
            .label(),
            "2024-03-05"
        );
    }
}
