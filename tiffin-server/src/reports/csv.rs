//! CSV export of filtered sales
//!
//! One row per order, chronological. Data cells are always quoted with
//! embedded quotes doubled, so item names containing commas or quotes
//! survive a round trip through spreadsheet software.

use shared::models::Order;

use super::money::format_money;
use crate::utils::time::{format_date, format_time};
use crate::utils::{AppError, AppResult};

const HEADER: &str = "Order ID,Date,Time,Restaurant,Items,Total,Payment Method";

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// `"Idly (x2); Dosai (x1)"` rendering of the order's lines
fn items_cell(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|l| format!("{} (x{})", l.name, l.quantity))
        .collect::<Vec<_>>()
        .join("; ")
}

fn row(order: &Order) -> String {
    [
        order.order_id.to_string(),
        format_date(order.date),
        format_time(order.date),
        order.restaurant_name.clone(),
        items_cell(order),
        format_money(order.total),
        order.payment_method_display().to_string(),
    ]
    .iter()
    .map(|cell| quote(cell))
    .collect::<Vec<_>>()
    .join(",")
}

/// Render the already-filtered orders as a CSV document.
///
/// Exporting an empty set is an error ([`AppError::NoData`]); reports
/// themselves have a defined empty state, exports do not.
pub fn export_csv(filtered: &[Order], scope_label: &str) -> AppResult<String> {
    if filtered.is_empty() {
        return Err(AppError::NoData(format!(
            "No sales data for {scope_label}"
        )));
    }

    let mut out = String::from(HEADER);
    for order in filtered {
        out.push('\n');
        out.push_str(&row(order));
    }
    out.push('\n');
    Ok(out)
}

/// Export filename for a monthly report
pub fn monthly_filename(label: &str) -> String {
    format!("monthly-report-{label}.csv")
}

/// Export filename for a daily report
pub fn daily_filename(label: &str) -> String {
    format!("daily-report-{label}.csv")
}
