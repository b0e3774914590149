//! Sales report engine
//!
//! Pure aggregation over the sales log: callers load the log from
//! storage, the engine filters by scope and computes totals, rankings
//! and paginated order details. Nothing here mutates the log.
//!
//! All date bucketing is UTC: an order belongs to the month/day of its
//! confirmation instant in UTC, matching how confirmation timestamps
//! are recorded.

pub mod csv;
pub mod money;


use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{DailySummary, Order, OrderDetail, PopularItem, ReportScope, SalesReport};

use crate::utils::time::millis_to_utc;
use self::money::round_display;

/// Order details per report page
pub const PAGE_SIZE: usize = 25;

/// Ranking depth of the popular items list
pub const TOP_ITEMS: usize = 5;

/// Default month scope: the current calendar month (UTC)
pub fn current_month_scope() -> ReportScope {
    let now = Utc::now();
    ReportScope::Month {
        year: now.year(),
        month: now.month(),
    }
}

/// Default day scope: today (UTC)
pub fn today_scope() -> ReportScope {
    ReportScope::Day {
        date: Utc::now().date_naive(),
    }
}

/// The orders whose confirmation instant falls inside `scope`,
/// preserving log (chronological) order
pub fn filter_orders(log: &[Order], scope: ReportScope) -> Vec<Order> {
    log.iter()
        .filter(|o| scope.contains(millis_to_utc(o.date)))
        .cloned()
        .collect()
}

/// Top-k items by summed quantity across the filtered orders.
///
/// Ties rank by first appearance in the log: the ranking is assembled
/// in encounter order and the final sort is stable.
fn popular_items(filtered: &[Order], k: usize) -> Vec<PopularItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<PopularItem> = Vec::new();

    for order in filtered {
        for line in &order.items {
            match index.get(line.name.as_str()) {
                Some(&i) => ranking[i].quantity += i64::from(line.quantity),
                None => {
                    index.insert(line.name.as_str(), ranking.len());
                    ranking.push(PopularItem {
                        name: line.name.clone(),
                        quantity: i64::from(line.quantity),
                    });
                }
            }
        }
    }

    ranking.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranking.truncate(k);
    ranking
}

fn order_detail(order: &Order) -> OrderDetail {
    OrderDetail {
        order_id: order.order_id,
        date: order.date,
        item_lines: order.items.len(),
        item_count: order.item_count(),
        total: order.total,
        payment_method: order.payment_method.clone(),
    }
}

/// Build the aggregate report for `scope` over the full sales log.
///
/// An empty filtered set yields the defined empty report (zero totals,
/// no average, one empty page). `requested_page` is clamped into
/// `[1, total_pages]`, so out-of-range pages are never an error.
pub fn build_report(log: &[Order], scope: ReportScope, requested_page: usize) -> SalesReport {
    let filtered = filter_orders(log, scope);

    let order_count = filtered.len();
    let total_sales: Decimal = filtered.iter().map(|o| o.total).sum();
    let average_order = (order_count > 0)
        .then(|| round_display(total_sales / Decimal::from(order_count as u64)));

    let total_pages = order_count.div_ceil(PAGE_SIZE).max(1);
    let page = requested_page.clamp(1, total_pages);
    let orders = filtered
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(order_detail)
        .collect();

    SalesReport {
        scope,
        total_sales,
        order_count,
        average_order,
        popular_items: popular_items(&filtered, TOP_ITEMS),
        orders,
        page,
        page_size: PAGE_SIZE,
        total_pages,
    }
}

/// The unpaginated summary for one day, as handed to the report relay
pub fn daily_summary(log: &[Order], restaurant_name: &str, date: NaiveDate) -> DailySummary {
    let filtered = filter_orders(log, ReportScope::Day { date });

    let total_orders = filtered.len();
    let total_sales: Decimal = filtered.iter().map(|o| o.total).sum();
    let average_order = (total_orders > 0)
        .then(|| round_display(total_sales / Decimal::from(total_orders as u64)));

    DailySummary {
        date,
        restaurant_name: restaurant_name.to_string(),
        total_orders,
        total_sales,
        average_order,
        popular_items: popular_items(&filtered, TOP_ITEMS),
        order_details: filtered.iter().map(order_detail).collect(),
    }
}
